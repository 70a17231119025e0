use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassSubjectService;
use crate::errors::SchoolError;
use crate::models::class_subjects::requests::{ClassSubjectUpdate, UpdateClassSubjectRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::integrity::is_instructor;
use crate::utils::validate::is_valid_max_marks;

pub async fn update_class_subject(
    service: &ClassSubjectService,
    request: &HttpRequest,
    class_subject_id: i64,
    data: UpdateClassSubjectRequest,
) -> ActixResult<HttpResponse> {
    if data.teacher_id.is_none() && data.max_marks.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Provide at least teacherId or maxMarks",
        )));
    }

    let storage = service.get_storage(request);

    let not_found = || {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassSubjectNotFound,
            "Class subject not found",
        ))
    };

    if storage
        .get_class_subject_by_id(class_subject_id)
        .await?
        .is_none()
    {
        return Ok(not_found());
    }

    if let Some(teacher_id) = data.teacher_id {
        let teacher = storage.get_user_by_id(teacher_id).await?;
        if !is_instructor(teacher.as_ref()) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidTeacher,
                "Invalid teacherId",
            )));
        }
    }

    if let Some(max_marks) = data.max_marks
        && !is_valid_max_marks(max_marks)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MarksOutOfRange,
            "maxMarks must be between 0 and 100",
        )));
    }

    let update = ClassSubjectUpdate {
        teacher_id: data.teacher_id,
        max_marks: data.max_marks,
    };

    match storage.update_class_subject(class_subject_id, update).await {
        Ok(Some(offering)) => {
            info!(
                "Class subject {} updated (teacher {}, max marks {})",
                offering.id, offering.teacher_id, offering.max_marks
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Class subject updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        // 已录入的成绩高于新的满分
        Err(SchoolError::Validation(detail)) => {
            info!("Rejected max marks change for class subject {class_subject_id}: {detail}");
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MarksOutOfRange,
                "maxMarks cannot be below marks already recorded",
            )))
        }
        Err(e) => Err(e.into()),
    }
}
