use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::ClassSummary;

// 考试实体，归属于某班级的某学年
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
    pub academic_year: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 带班级信息的考试
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDetail {
    pub id: i64,
    pub name: String,
    pub academic_year: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub class: Option<ClassSummary>,
}
