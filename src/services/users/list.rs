use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::ApiResponse;
use crate::models::users::{entities::UserRole, responses::TeacherListResponse};

pub async fn list_teachers(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teachers = storage.list_users_by_role(UserRole::Instructor).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherListResponse { teachers },
        "Teachers fetched successfully",
    )))
}
