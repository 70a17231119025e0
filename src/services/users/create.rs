use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::UserService;
use crate::errors::SchoolError;
use crate::models::users::{
    entities::UserRole,
    requests::{CreateUserRequest, NewUser},
    responses::UserCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, required_text, validate_email};

pub async fn create_teacher(
    service: &UserService,
    request: &HttpRequest,
    user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    create_account(
        &storage,
        user_data,
        UserRole::Instructor,
        AccountMessages {
            success: "Teacher created successfully",
            conflict: "User with this email already exists",
        },
    )
    .await
}

/// 账号创建的响应文案
pub(crate) struct AccountMessages {
    pub success: &'static str,
    pub conflict: &'static str,
}

/// 创建指定角色的账号（教师账号与 signup 共用）
pub(crate) async fn create_account(
    storage: &Arc<dyn Storage>,
    user_data: CreateUserRequest,
    role: UserRole,
    messages: AccountMessages,
) -> ActixResult<HttpResponse> {
    let (Some(username), Some(email), Some(password)) = (
        required_text(user_data.username.as_deref()),
        required_text(user_data.email.as_deref()),
        user_data.password.filter(|p| !p.is_empty()),
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "username, email and password are required",
        )));
    };

    let email = normalize_email(&email);
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let conflict = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            messages.conflict,
        ))
    };

    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(conflict());
    }

    let new_user = NewUser {
        username,
        email,
        password_hash: hash_password(&password)?,
        role,
    };

    match storage.create_user(new_user).await {
        Ok(user) => {
            info!("{} account {} created", user.role, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserCreatedResponse { user_id: user.id },
                messages.success,
            )))
        }
        Err(SchoolError::Conflict(detail)) => {
            warn!("Account creation lost a uniqueness race: {}", detail);
            Ok(conflict())
        }
        Err(e) => Err(e.into()),
    }
}
