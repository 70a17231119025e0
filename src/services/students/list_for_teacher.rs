use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::{requests::ClassStudentsQuery, responses::StudentListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_user;

pub async fn list_class_students(
    service: &StudentService,
    request: &HttpRequest,
    query: ClassStudentsQuery,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let Some(class_id) = query.class_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "classId is required",
        )));
    };

    let storage = service.get_storage(request);

    if !storage.teacher_teaches_class(user.id, class_id).await? {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotAssignedToClass,
            "You are not assigned to this class",
        )));
    }

    let students = storage.list_students(Some(class_id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentListResponse { students },
        "Students fetched successfully",
    )))
}
