use serde::Serialize;
use ts_rs::TS;

use super::entities::ExamDetail;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamCreatedResponse {
    pub exam_id: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub exams: Vec<ExamDetail>,
}
