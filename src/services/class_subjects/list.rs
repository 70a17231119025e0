use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSubjectService;
use crate::models::ApiResponse;
use crate::models::class_subjects::{
    requests::ClassSubjectQuery, responses::ClassSubjectListResponse,
};
use crate::services::require_user;

pub async fn list_class_subjects(
    service: &ClassSubjectService,
    request: &HttpRequest,
    query: ClassSubjectQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let class_subjects = storage.list_class_subjects(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassSubjectListResponse { class_subjects },
        "Class subjects fetched successfully",
    )))
}

pub async fn list_my_class_subjects(
    service: &ClassSubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let class_subjects = storage
        .list_class_subjects(ClassSubjectQuery {
            class_id: None,
            teacher_id: Some(user.id),
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassSubjectListResponse { class_subjects },
        "Class subjects fetched successfully",
    )))
}
