use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::deserialize_optional_i64;

// 创建学生请求：同时创建账号与学籍
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub enrollment_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
}

// 更新学生请求，只修改提供的字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub enrollment_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
}

// 调班请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ShiftClassRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
}

// 教师按班级查询学生
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ClassStudentsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub class_id: Option<i64>,
}

// 写入存储层的新学生（账号 + 学籍）
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub enrollment_number: String,
    pub class_id: i64,
}

// 存储层的学生更新，账号与学籍字段在同一事务中写入
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub enrollment_number: Option<String>,
    pub class_id: Option<i64>,
}

impl StudentUpdate {
    pub fn touches_user(&self) -> bool {
        self.username.is_some() || self.email.is_some() || self.password_hash.is_some()
    }
}
