use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{ResultService, aggregate::aggregate_with_stats, record_unresolved_exam_rows};
use crate::models::results::responses::{StudentProfile, StudentResultsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_user;

pub async fn my_results(
    service: &ResultService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let Some(student) = storage.get_student_by_user_id(user.id).await? else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student profile not found",
        )));
    };

    let class = storage.get_class_detail(student.class_id).await?;
    let rows = storage.list_results_for_student(student.id).await?;

    let aggregation = aggregate_with_stats(&rows);
    if aggregation.unresolved_exam_rows > 0 {
        warn!(
            "Skipped {} result row(s) with unresolved exam for student {}",
            aggregation.unresolved_exam_rows, student.id
        );
        record_unresolved_exam_rows(aggregation.unresolved_exam_rows);
    }

    let response = StudentResultsResponse {
        student: StudentProfile {
            id: student.id,
            username: user.username,
            email: user.email,
            enrollment_number: student.enrollment_number,
            class,
        },
        result_sheets: aggregation.sheets,
        results: rows,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Results fetched successfully")))
}
