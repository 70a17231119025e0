//! 路径 ID 安全提取器
//!
//! 路径参数必须是正整数，否则直接返回 400 信封，不进入处理函数。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

fn invalid_id_error(param: &'static str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid {param}"),
    ));
    InternalError::from_response(format!("invalid path parameter {param}"), response).into()
}

macro_rules! define_safe_id_extractors {
    ($($name:ident => $param:literal, $label:literal;)*) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(
                        parse_positive_id(req.match_info().get($param))
                            .map($name)
                            .ok_or_else(|| invalid_id_error($label)),
                    )
                }
            }
        )*
    };
}

define_safe_id_extractors! {
    SafeStudentIdI64 => "student_id", "studentId";
    SafeClassIdI64 => "class_id", "classId";
    SafeClassSubjectIdI64 => "class_subject_id", "classSubjectId";
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("12")), Some(12));
        assert_eq!(parse_positive_id(Some("0")), None);
        assert_eq!(parse_positive_id(Some("-3")), None);
        assert_eq!(parse_positive_id(Some("abc")), None);
        assert_eq!(parse_positive_id(None), None);
    }

    #[actix_web::test]
    async fn test_extractor_reads_path_param() {
        let req = TestRequest::default()
            .param("student_id", "7")
            .to_http_request();
        let id = SafeStudentIdI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeStudentIdI64(7));

        let bad = TestRequest::default()
            .param("class_id", "x1")
            .to_http_request();
        let err = SafeClassIdI64::extract(&bad).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }
}
