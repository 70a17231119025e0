use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{Result, SchoolError};
use crate::models::common::deserialize_optional_i64;

// 创建考试请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
    pub academic_year: Option<String>,
    /// RFC 3339 时间或 YYYY-MM-DD 日期
    pub date: Option<String>,
}

// 按班级筛选考试
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
}

// 写入存储层的新考试
#[derive(Debug, Clone)]
pub struct NewExam {
    pub name: String,
    pub class_id: i64,
    pub academic_year: String,
    pub date: DateTime<Utc>,
}

/// 解析考试日期，纯日期按 UTC 零点处理
pub fn parse_exam_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| SchoolError::date_parse(format!("Invalid exam date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = parse_exam_date("2025-03-14").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-14T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let date = parse_exam_date("2025-03-14T10:00:00+05:30").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-14T04:30:00+00:00");
    }

    #[test]
    fn test_parse_invalid_date() {
        let err = parse_exam_date("14/03/2025").unwrap_err();
        assert!(matches!(err, SchoolError::DateParse(_)));
    }
}
