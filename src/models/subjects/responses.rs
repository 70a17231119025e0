use serde::Serialize;
use ts_rs::TS;

use super::entities::Subject;

/// 创建成功与名称冲突时都会返回该科目 id
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectIdResponse {
    pub subject_id: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub subjects: Vec<Subject>,
}
