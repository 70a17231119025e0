use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::ApiResponse;
use crate::models::exams::{requests::ExamQuery, responses::ExamListResponse};

pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    query: ExamQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let exams = storage.list_exams(query.class_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ExamListResponse { exams },
        "Exams fetched successfully",
    )))
}
