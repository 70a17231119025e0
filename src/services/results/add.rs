use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ResultService, grading};
use crate::errors::SchoolError;
use crate::models::results::{
    requests::{AddResultRequest, NewResult},
    responses::ResultCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::integrity::check_result_entry;
use crate::services::require_user;

pub async fn add_result(
    service: &ResultService,
    request: &HttpRequest,
    result_data: AddResultRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match require_user(request) {
        Ok(user) => user.id,
        Err(resp) => return Ok(resp),
    };

    let (Some(student_id), Some(class_subject_id), Some(exam_id), Some(marks_obtained)) = (
        result_data.student_id,
        result_data.class_subject_id,
        result_data.exam_id,
        result_data.marks_obtained,
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "studentId, classSubjectId, examId and marksObtained are required",
        )));
    };

    let storage = service.get_storage(request);

    let offering = storage.get_class_subject_by_id(class_subject_id).await?;
    let student = storage.get_student_by_id(student_id).await?;
    let exam = storage.get_exam_by_id(exam_id).await?;

    let offering = match check_result_entry(
        teacher_id,
        offering.as_ref(),
        student.as_ref(),
        exam.as_ref(),
        marks_obtained,
    ) {
        Ok(offering) => offering,
        Err(rejection) => {
            info!(
                "Result entry by teacher {} rejected: {:?}",
                teacher_id, rejection
            );
            return Ok(rejection.into_response());
        }
    };

    let new_result = NewResult {
        student_id,
        class_subject_id,
        exam_id,
        marks_obtained,
        grade: grading::grade(marks_obtained, offering.max_marks),
    };

    match storage.create_result(new_result).await {
        Ok(entry) => {
            info!(
                "Result {} recorded by teacher {} for student {}",
                entry.id, teacher_id, student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ResultCreatedResponse { result_id: entry.id },
                "Result added successfully",
            )))
        }
        Err(SchoolError::Conflict(detail)) => {
            warn!("Duplicate result rejected by unique index: {}", detail);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ResultAlreadyExists,
                "Result already exists for this student, subject and exam",
            )))
        }
        Err(e) => Err(e.into()),
    }
}
