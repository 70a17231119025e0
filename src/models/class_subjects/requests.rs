use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{deserialize_optional_f64, deserialize_optional_i64};

// 创建开课请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct CreateClassSubjectRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    #[ts(type = "number | string | null")]
    pub max_marks: Option<f64>,
}

// 更新开课请求，至少提供一项
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct UpdateClassSubjectRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    #[ts(type = "number | string | null")]
    pub max_marks: Option<f64>,
}

// 开课列表筛选参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct ClassSubjectQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub teacher_id: Option<i64>,
}

// 写入存储层的新开课记录
#[derive(Debug, Clone)]
pub struct NewClassSubject {
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub max_marks: f64,
}

// 存储层的开课更新
#[derive(Debug, Clone, Default)]
pub struct ClassSubjectUpdate {
    pub teacher_id: Option<i64>,
    pub max_marks: Option<f64>,
}
