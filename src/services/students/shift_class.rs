use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::{ShiftClassRequest, StudentUpdate};
use crate::models::{ApiResponse, ErrorCode};

pub async fn shift_class(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    shift_data: ShiftClassRequest,
) -> ActixResult<HttpResponse> {
    let Some(class_id) = shift_data.class_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "classId is required",
        )));
    };

    let storage = service.get_storage(request);

    if storage.get_student_by_id(student_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        )));
    }

    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    let update = StudentUpdate {
        class_id: Some(class_id),
        ..Default::default()
    };

    match storage.update_student(student_id, update).await? {
        Some(student) => {
            info!("Student {} shifted to class {}", student.id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student shifted successfully")))
        }
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
    }
}
