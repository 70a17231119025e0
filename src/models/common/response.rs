use serde::Serialize;

use crate::models::ErrorCode;

// 统一的API响应结构，业务数据平铺在顶层
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(flatten)]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Created {
        class_id: i64,
    }

    #[test]
    fn test_payload_is_flattened() {
        let value =
            serde_json::to_value(ApiResponse::success(Created { class_id: 7 }, "ok")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["code"], 0);
        assert_eq!(value["classId"], 7);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_error_empty_has_no_payload() {
        let value =
            serde_json::to_value(ApiResponse::error_empty(ErrorCode::NotFound, "Class not found"))
                .unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["code"], ErrorCode::NotFound as i32);
        assert_eq!(value["message"], "Class not found");
    }
}
