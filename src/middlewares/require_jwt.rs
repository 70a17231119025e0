/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，从存储中加载对应用户并放入请求扩展，
 * 供后续的角色中间件与处理函数使用。
 *
 * ```rust,ignore
 * web::scope("/api/v1/admin")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::scope("")
 *             .wrap(RequireRole::new_any(UserRole::admin_roles()))
 *             .route("/teachers", web::get().to(list_teachers)),
 *     )
 * ```
 *
 * ## 失败响应
 *
 * - 缺少令牌：401 "Access denied. Token missing."
 * - 令牌过期：401 "Session expired. Please login again."
 * - 令牌无效或用户不存在：401 "Invalid token"
 * - 加载用户时存储出错：500 "Internal server error"
 */

use crate::models::users::entities::{User, UserRole};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, TokenRejection};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    Missing,
    Expired,
    Invalid,
    /// 存储不可用，与令牌本身无关
    Unavailable,
}

impl AuthFailure {
    fn status(self) -> StatusCode {
        match self {
            AuthFailure::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(self) -> ErrorCode {
        match self {
            AuthFailure::Expired => ErrorCode::TokenExpired,
            AuthFailure::Missing | AuthFailure::Invalid => ErrorCode::Unauthorized,
            AuthFailure::Unavailable => ErrorCode::InternalServerError,
        }
    }

    fn message(self) -> &'static str {
        match self {
            AuthFailure::Missing => "Access denied. Token missing.",
            AuthFailure::Expired => "Session expired. Please login again.",
            AuthFailure::Invalid => "Invalid token",
            AuthFailure::Unavailable => "Internal server error",
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

// 提取并验证 access token，再从存储中加载用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = bearer_token(req).ok_or(AuthFailure::Missing)?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|rejection| {
        info!("JWT token validation failed: {:?}", rejection);
        match rejection {
            TokenRejection::Expired => AuthFailure::Expired,
            TokenRejection::Invalid => AuthFailure::Invalid,
        }
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AuthFailure::Invalid)?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            info!("Token subject {} no longer exists", user_id);
            Err(AuthFailure::Invalid)
        }
        Err(e) => {
            error!("Failed to load user {} for token: {}", user_id, e);
            Err(AuthFailure::Unavailable)
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    info!(
                        "JWT authentication failed for request to {}: {:?}",
                        req.path(),
                        failure
                    );
                    Ok(req.into_response(
                        create_error_response(
                            failure.status(),
                            failure.code(),
                            failure.message(),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    /// 从请求扩展中提取用户角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            AuthFailure::Missing.message(),
            "Access denied. Token missing."
        );
        assert_eq!(AuthFailure::Expired.code(), ErrorCode::TokenExpired);
        assert_eq!(AuthFailure::Invalid.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_storage_failure_is_server_error() {
        assert_eq!(
            AuthFailure::Unavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthFailure::Unavailable.code(),
            ErrorCode::InternalServerError
        );
        assert_eq!(AuthFailure::Invalid.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthFailure::Expired.status(), StatusCode::UNAUTHORIZED);
    }
}
