use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::errors::SchoolError;
use crate::models::classes::{
    entities::Section,
    requests::{CreateClassRequest, NewClass},
    responses::ClassCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::integrity::is_instructor;
use crate::utils::validate::required_text;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let (Some(name), Some(section)) = (
        required_text(class_data.name.as_deref()),
        required_text(class_data.section.as_deref()),
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "name and section are required",
        )));
    };

    let section: Section = match section.parse() {
        Ok(section) => section,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidSection, msg)));
        }
    };

    let storage = service.get_storage(request);

    if storage
        .get_class_by_name_and_section(&name, section)
        .await?
        .is_some()
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassAlreadyExists,
            "Class already exists",
        )));
    }

    // 班主任可选，提供时必须是教师
    if let Some(incharge_id) = class_data.class_incharge_id {
        let incharge = storage.get_user_by_id(incharge_id).await?;
        if !is_instructor(incharge.as_ref()) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidIncharge,
                "Invalid class incharge",
            )));
        }
    }

    let new_class = NewClass {
        name,
        section,
        incharge_id: class_data.class_incharge_id,
    };

    match storage.create_class(new_class).await {
        Ok(class) => {
            info!("Class {} {} created ({})", class.name, class.section, class.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ClassCreatedResponse { class_id: class.id },
                "Class created successfully",
            )))
        }
        Err(SchoolError::Conflict(detail)) => {
            error!("Class creation hit unique index: {}", detail);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassAlreadyExists,
                "Class already exists",
            )))
        }
        Err(e) => Err(e.into()),
    }
}
