use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ExamService;
use crate::errors::SchoolError;
use crate::models::exams::{
    requests::{CreateExamRequest, NewExam, parse_exam_date},
    responses::ExamCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::required_text;

fn already_exists() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ExamAlreadyExists,
        "Exam already exists for this class and academic year",
    ))
}

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_data: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let (Some(name), Some(class_id), Some(academic_year), Some(raw_date)) = (
        required_text(exam_data.name.as_deref()),
        exam_data.class_id,
        required_text(exam_data.academic_year.as_deref()),
        required_text(exam_data.date.as_deref()),
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "name, classId, academicYear and date are required",
        )));
    };

    let date = match parse_exam_date(&raw_date) {
        Ok(date) => date,
        Err(e) => {
            warn!("Rejected exam date {:?}: {}", raw_date, e);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "date must be an RFC 3339 timestamp or YYYY-MM-DD",
            )));
        }
    };

    let storage = service.get_storage(request);

    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    if storage
        .get_exam_by_name_class_year(&name, class_id, &academic_year)
        .await?
        .is_some()
    {
        return Ok(already_exists());
    }

    let new_exam = NewExam {
        name,
        class_id,
        academic_year,
        date,
    };

    match storage.create_exam(new_exam).await {
        Ok(exam) => {
            info!(
                "Exam {} created for class {} ({})",
                exam.name, exam.class_id, exam.academic_year
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ExamCreatedResponse { exam_id: exam.id },
                "Exam created successfully",
            )))
        }
        Err(SchoolError::Conflict(detail)) => {
            warn!("Exam creation hit unique index: {}", detail);
            Ok(already_exists())
        }
        Err(e) => Err(e.into()),
    }
}
