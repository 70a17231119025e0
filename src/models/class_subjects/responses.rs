use serde::Serialize;
use ts_rs::TS;

use super::entities::ClassSubjectDetail;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct ClassSubjectCreatedResponse {
    pub class_subject_id: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class_subject.ts")]
pub struct ClassSubjectListResponse {
    pub class_subjects: Vec<ClassSubjectDetail>,
}
