use serde::Serialize;
use ts_rs::TS;

// 健康检查响应
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub ok: bool,
    pub uptime_seconds: i64,
    /// 进程启动以来聚合成绩单时跳过的、考试已不存在的成绩行数
    pub unresolved_exam_rows: u64,
}
