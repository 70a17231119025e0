use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::SchoolError;
use crate::models::subjects::{requests::CreateSubjectRequest, responses::SubjectIdResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::required_text;

fn already_exists(subject_id: i64) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::SubjectAlreadyExists,
        SubjectIdResponse { subject_id },
        "Subject already exists",
    ))
}

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let Some(name) = required_text(subject_data.name.as_deref()) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "name is required",
        )));
    };

    let storage = service.get_storage(request);

    // 冲突时带回已有科目的 id，前端可直接复用
    if let Some(existing) = storage.get_subject_by_name(&name).await? {
        return Ok(already_exists(existing.id));
    }

    match storage.create_subject(&name).await {
        Ok(subject) => {
            info!("Subject {} created ({})", subject.name, subject.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubjectIdResponse {
                    subject_id: subject.id,
                },
                "Subject created successfully",
            )))
        }
        Err(SchoolError::Conflict(_)) => match storage.get_subject_by_name(&name).await? {
            Some(existing) => Ok(already_exists(existing.id)),
            None => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                "Subject already exists",
            ))),
        },
        Err(e) => Err(e.into()),
    }
}
