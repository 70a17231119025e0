use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::{normalize_email, required_text};

use super::AuthService;

// 未知邮箱与错误密码返回同一响应，避免暴露账号是否存在
fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Invalid credentials",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (Some(email), Some(password)) = (
        required_text(login_request.email.as_deref()),
        login_request.password.filter(|p| !p.is_empty()),
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "email and password are required",
        )));
    };

    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据邮箱获取用户信息
    let Some(user) = storage.get_user_by_email(&normalize_email(&email)).await? else {
        return Ok(invalid_credentials());
    };

    // 2. 验证密码
    if !verify_password(&password, &user.password_hash) {
        tracing::info!("Failed login attempt for user {}", user.id);
        return Ok(invalid_credentials());
    }

    // 3. 签发 Access Token
    match JwtUtils::generate_access_token(user.id, user.role.as_str()) {
        Ok(token) => {
            tracing::info!("User {} logged in successfully", user.username);

            let response = LoginResponse {
                token,
                role: user.role,
                username: user.username,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
