pub mod auth;
pub mod class_subjects;
pub mod classes;
pub mod common;
pub mod exams;
pub mod results;
pub mod students;
pub mod subjects;
pub mod system;
pub mod users;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 千位区分大类：1xxx 请求错误，2xxx 认证授权，3xxx 资源不存在，4xxx 资源冲突，5xxx 服务器错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    InvalidSection = 1002,
    InvalidTeacher = 1003,
    InvalidIncharge = 1004,
    MarksOutOfRange = 1005,
    StudentNotInClass = 1006,
    ExamNotInClass = 1007,

    // 认证授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    TokenExpired = 2002,
    Forbidden = 2003,
    NotAssignedToSubject = 2004,
    NotAssignedToClass = 2005,

    // 资源不存在
    NotFound = 3000,
    UserNotFound = 3001,
    ClassNotFound = 3002,
    SubjectNotFound = 3003,
    ClassSubjectNotFound = 3004,
    ExamNotFound = 3005,
    StudentNotFound = 3006,

    // 资源冲突
    Conflict = 4000,
    UserAlreadyExists = 4001,
    EnrollmentNumberExists = 4002,
    ClassAlreadyExists = 4003,
    SubjectAlreadyExists = 4004,
    ClassSubjectAlreadyExists = 4005,
    ExamAlreadyExists = 4006,
    ResultAlreadyExists = 4007,

    RateLimitExceeded = 4290,

    InternalServerError = 5000,
}
