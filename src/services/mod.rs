pub mod auth;
pub mod class_subjects;
pub mod classes;
pub mod exams;
pub mod integrity;
pub mod results;
pub mod students;
pub mod subjects;
pub mod system;
pub mod users;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

pub use auth::AuthService;
pub use class_subjects::ClassSubjectService;
pub use classes::ClassService;
pub use exams::ExamService;
pub use results::ResultService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;

/// 取出 RequireJWT 放入请求扩展的当前用户
pub(crate) fn require_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Access denied. Token missing.",
        ))
    })
}
