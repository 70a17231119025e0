//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(SchoolError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E004", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E005", "Date Parse Error", BAD_REQUEST),
    PasswordHash("E006", "Password Hash Error", INTERNAL_SERVER_ERROR),
    Validation("E007", "Validation Error", BAD_REQUEST),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Conflict("E009", "Resource Conflict", CONFLICT),
    Authentication("E010", "Authentication Error", UNAUTHORIZED),
    Authorization("E011", "Authorization Error", FORBIDDEN),
}

impl SchoolError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为内部错误（不向调用方暴露细节）
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => ErrorCode::ValidationFailed,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::Conflict(_) => ErrorCode::Conflict,
            SchoolError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolError::Authorization(_) => ErrorCode::Forbidden,
            SchoolError::DatabaseConfig(_)
            | SchoolError::DatabaseConnection(_)
            | SchoolError::DatabaseOperation(_)
            | SchoolError::Serialization(_)
            | SchoolError::PasswordHash(_) => ErrorCode::InternalServerError,
        }
    }

    /// 将数据库错误按约束类型归类
    ///
    /// 唯一约束冲突映射为 Conflict，外键约束失败映射为 NotFound。
    pub fn from_db(context: &str, err: DbErr) -> Self {
        let detail = err.to_string();
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                SchoolError::conflict(format!("{context}: {msg}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                SchoolError::not_found(format!("{context}: {msg}"))
            }
            _ if detail.contains("UNIQUE constraint failed") => {
                SchoolError::conflict(format!("{context}: {detail}"))
            }
            _ if detail.contains("FOREIGN KEY constraint failed") => {
                SchoolError::not_found(format!("{context}: {detail}"))
            }
            _ => SchoolError::database_operation(format!("{context}: {detail}")),
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl ResponseError for SchoolError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            error!("{}", self.format_simple());
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        };
        HttpResponse::build(self.status()).json(ApiResponse::error_empty(self.error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolError {
    fn from(err: DbErr) -> Self {
        SchoolError::from_db("Database operation failed", err)
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::database_config("test").code(), "E001");
        assert_eq!(SchoolError::validation("test").code(), "E007");
        assert_eq!(SchoolError::conflict("test").code(), "E009");
        assert_eq!(SchoolError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(SchoolError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(SchoolError::authentication("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(SchoolError::authorization("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(SchoolError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(SchoolError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            SchoolError::database_operation("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = SchoolError::database_operation("connection reset by peer");
        assert!(err.is_internal());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!SchoolError::conflict("dup").is_internal());
    }

    #[test]
    fn test_error_message() {
        let err = SchoolError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::conflict("Class already exists");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("Class already exists"));
    }
}
