use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{
    classes::entities::ClassSummary, subjects::entities::Subject,
    users::entities::UserSummary,
};

// 开课记录：某教师为某班级讲授某科目，并设定满分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct ClassSubject {
    pub id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub max_marks: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 关联科目、班级与教师后的开课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct ClassSubjectDetail {
    pub id: i64,
    pub max_marks: f64,
    pub subject: Option<Subject>,
    pub class: Option<ClassSummary>,
    pub teacher: Option<UserSummary>,
}
