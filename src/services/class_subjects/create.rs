use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ClassSubjectService;
use crate::errors::SchoolError;
use crate::models::class_subjects::{
    requests::{CreateClassSubjectRequest, NewClassSubject},
    responses::ClassSubjectCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::integrity::is_instructor;
use crate::utils::validate::is_valid_max_marks;

pub async fn create_class_subject(
    service: &ClassSubjectService,
    request: &HttpRequest,
    data: CreateClassSubjectRequest,
) -> ActixResult<HttpResponse> {
    let (Some(subject_id), Some(class_id), Some(teacher_id), Some(max_marks)) =
        (data.subject_id, data.class_id, data.teacher_id, data.max_marks)
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "subjectId, classId, teacherId and maxMarks are required",
        )));
    };

    let storage = service.get_storage(request);

    if storage.get_subject_by_id(subject_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )));
    }

    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    let teacher = storage.get_user_by_id(teacher_id).await?;
    if !is_instructor(teacher.as_ref()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidTeacher,
            "Invalid teacherId",
        )));
    }

    if !is_valid_max_marks(max_marks) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MarksOutOfRange,
            "maxMarks must be between 0 and 100",
        )));
    }

    let conflict = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassSubjectAlreadyExists,
            "Class subject already exists",
        ))
    };

    if storage
        .get_class_subject_by_subject_and_class(subject_id, class_id)
        .await?
        .is_some()
    {
        return Ok(conflict());
    }

    let new_offering = NewClassSubject {
        subject_id,
        class_id,
        teacher_id,
        max_marks,
    };

    match storage.create_class_subject(new_offering).await {
        Ok(offering) => {
            info!(
                "Class subject {} created (subject {}, class {}, teacher {})",
                offering.id, subject_id, class_id, teacher_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ClassSubjectCreatedResponse {
                    class_subject_id: offering.id,
                },
                "Class subject created successfully",
            )))
        }
        Err(SchoolError::Conflict(detail)) => {
            warn!("Class subject creation hit unique index: {}", detail);
            Ok(conflict())
        }
        Err(e) => Err(e.into()),
    }
}
