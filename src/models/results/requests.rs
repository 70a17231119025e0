use serde::Deserialize;
use ts_rs::TS;

use super::entities::Grade;
use crate::models::common::{deserialize_optional_f64, deserialize_optional_i64};

// 教师录入成绩请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AddResultRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub exam_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    #[ts(type = "number | string | null")]
    pub marks_obtained: Option<f64>,
}

// 写入存储层的新成绩
#[derive(Debug, Clone)]
pub struct NewResult {
    pub student_id: i64,
    pub class_subject_id: i64,
    pub exam_id: i64,
    pub marks_obtained: f64,
    pub grade: Grade,
}
