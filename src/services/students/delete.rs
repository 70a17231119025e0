use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};

// 删除学籍、账号及其成绩
pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if storage.delete_student(student_id).await? {
        info!("Student {} removed", student_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student removed successfully")))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        )))
    }
}
