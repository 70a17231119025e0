use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, auth::UserInfoResponse};
use crate::services::require_user;

pub async fn handle_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match require_user(request) {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User info fetched successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
