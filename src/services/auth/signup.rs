use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::services::users::create::{AccountMessages, create_account};

// 只创建学生角色账号，不建立学籍
pub async fn handle_signup(
    service: &AuthService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    create_account(
        &storage,
        create_request,
        UserRole::Student,
        AccountMessages {
            success: "Student created successfully",
            conflict: "User already exists",
        },
    )
    .await
}
