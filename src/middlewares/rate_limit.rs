/*!
 * 登录限流中间件
 *
 * 按客户端 IP 统计固定时间窗口内的请求次数，超过上限返回 429。
 * 窗口从该 IP 的第一次请求开始计时，窗口结束后计数清零。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login()) // 5 次 / 60 秒 / IP
 *     .route(web::post().to(login))
 * ```
 *
 * 部署在反向代理之后时，代理必须正确设置 X-Forwarded-For，否则所有请求会共用代理的 IP。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 缓存条目的最长存活时间，需不小于任一限流窗口
const MAX_WINDOW_SECS: u64 = 3600;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// 某个键在当前窗口内的计数
#[derive(Debug, Clone, Copy)]
struct AttemptWindow {
    started: Instant,
    count: u32,
}

/// 键: `前缀:ip`
static ATTEMPTS: Lazy<Cache<String, AttemptWindow>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    /// 放行，附带窗口内剩余次数
    Allow { remaining: u32 },
    /// 拒绝，附带距窗口结束的秒数
    Reject { retry_after: u64 },
}

/// 根据已有窗口决定是否放行，并给出更新后的窗口
fn admit(
    previous: Option<AttemptWindow>,
    now: Instant,
    max_requests: u32,
    window: Duration,
) -> (Decision, AttemptWindow) {
    let current = match previous {
        Some(w) if now.saturating_duration_since(w.started) < window => w,
        _ => AttemptWindow {
            started: now,
            count: 0,
        },
    };

    if current.count >= max_requests {
        let elapsed = now.saturating_duration_since(current.started);
        let retry_after = window.saturating_sub(elapsed).as_secs().max(1);
        return (Decision::Reject { retry_after }, current);
    }

    let updated = AttemptWindow {
        count: current.count + 1,
        ..current
    };
    (
        Decision::Allow {
            remaining: max_requests - updated.count,
        },
        updated,
    )
}

/// 限流配置
#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.min(MAX_WINDOW_SECS),
            key_prefix,
        }
    }

    /// 登录：5 次 / 60 秒 / IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

/// 客户端 IP，依次取 Forwarded / X-Forwarded-For / 对端地址
fn client_ip(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    match info.realip_remote_addr() {
        Some(ip) if is_valid_ip(ip) => ip.to_string(),
        // 对端地址带端口
        Some(addr) => addr
            .parse::<std::net::SocketAddr>()
            .map(|sock| sock.ip().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
        None => "unknown".to_string(),
    }
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let config = self.config.clone();

        Box::pin(async move {
            let key = format!("{}:{}", config.key_prefix, client_ip(&req));
            let (decision, window) = admit(
                ATTEMPTS.get(&key).await,
                Instant::now(),
                config.max_requests,
                Duration::from_secs(config.window_secs),
            );
            ATTEMPTS.insert(key.clone(), window).await;

            match decision {
                Decision::Reject { retry_after } => {
                    warn!(
                        "Rate limit exceeded for {} ({} requests in {}s)",
                        key, window.count, config.window_secs
                    );
                    Ok(req.into_response(too_many_requests(retry_after).map_into_right_body()))
                }
                Decision::Allow { remaining } => {
                    let mut res = srv.call(req).await?;
                    res.headers_mut().insert(
                        HeaderName::from_static(REMAINING_HEADER),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_preset() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");
    }

    #[test]
    fn test_window_counts_then_rejects() {
        let start = Instant::now();
        let window = Duration::from_secs(60);
        let mut state = None;

        for expected_remaining in (0..3).rev() {
            let (decision, next) = admit(state, start, 3, window);
            assert_eq!(
                decision,
                Decision::Allow {
                    remaining: expected_remaining
                }
            );
            state = Some(next);
        }

        let (decision, _) = admit(state, start + Duration::from_secs(20), 3, window);
        assert_eq!(decision, Decision::Reject { retry_after: 40 });
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let start = Instant::now();
        let window = Duration::from_secs(60);
        let full = AttemptWindow {
            started: start,
            count: 5,
        };

        let (decision, next) = admit(Some(full), start + window, 5, window);
        assert_eq!(decision, Decision::Allow { remaining: 4 });
        assert_eq!(next.count, 1);
    }

    #[test]
    fn test_ip_validation() {
        assert!(is_valid_ip("127.0.0.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("not-an-ip"));
    }
}
