use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::UpdateInchargeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::integrity::is_instructor;

pub async fn update_incharge(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    incharge_data: UpdateInchargeRequest,
) -> ActixResult<HttpResponse> {
    let Some(incharge_id) = incharge_data.class_incharge_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "classInchargeId is required",
        )));
    };

    let storage = service.get_storage(request);

    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    let incharge = storage.get_user_by_id(incharge_id).await?;
    if !is_instructor(incharge.as_ref()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidIncharge,
            "Invalid class incharge",
        )));
    }

    match storage.update_class_incharge(class_id, incharge_id).await? {
        Some(_) => {
            info!("Class {} incharge set to {}", class_id, incharge_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Class incharge assigned successfully",
            )))
        }
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
    }
}
