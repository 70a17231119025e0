use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::responses::StudentListResponse;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let students = storage.list_students(None).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentListResponse { students },
        "Students fetched successfully",
    )))
}
