use serde::Serialize;
use ts_rs::TS;

use super::entities::StudentDetail;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentCreatedResponse {
    pub user_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub students: Vec<StudentDetail>,
}
