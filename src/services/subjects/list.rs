use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::responses::SubjectListResponse;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let subjects = storage.list_subjects().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectListResponse { subjects },
        "Subjects fetched successfully",
    )))
}
