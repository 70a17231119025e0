use serde::Deserialize;
use ts_rs::TS;

use super::entities::Section;
use crate::models::common::deserialize_optional_i64;

// 创建班级请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: Option<String>,
    pub section: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_incharge_id: Option<i64>,
}

// 指派班主任请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateInchargeRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_incharge_id: Option<i64>,
}

// 写入存储层的新班级
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub section: Section,
    pub incharge_id: Option<i64>,
}
