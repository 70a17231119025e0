use serde::Serialize;
use ts_rs::TS;

use super::entities::{ExamSheet, ResultRow};
use crate::models::classes::entities::ClassDetail;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultCreatedResponse {
    pub result_id: i64,
}

// 成绩单页面顶部的学生信息
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct StudentProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub enrollment_number: String,
    pub class: Option<ClassDetail>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct StudentResultsResponse {
    pub student: StudentProfile,
    pub result_sheets: Vec<ExamSheet>,
    pub results: Vec<ResultRow>,
}
