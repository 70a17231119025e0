use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{classes::entities::ClassSummary, users::entities::UserSummary};

// 学籍：把学生账号与班级关联起来
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub enrollment_number: String,
    pub class_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 关联账号与班级后的学籍
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDetail {
    pub id: i64,
    pub enrollment_number: String,
    pub user: Option<UserSummary>,
    pub class: Option<ClassSummary>,
}
