//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{class_subjects, exams, results};
use crate::errors::{Result, SchoolError};
use crate::models::results::{
    entities::{ResultEntry, ResultRow},
    requests::NewResult,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入成绩，重复录入由唯一索引拒绝
    pub async fn create_result_impl(&self, result: NewResult) -> Result<ResultEntry> {
        let model = results::ActiveModel {
            student_id: Set(result.student_id),
            class_subject_id: Set(result.class_subject_id),
            exam_id: Set(result.exam_id),
            marks_obtained: Set(result.marks_obtained),
            grade: Set(result.grade.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("录入成绩失败", e))?;

        Ok(inserted.into_result_entry())
    }

    /// 学生的全部成绩，关联考试、开课、科目与班级
    pub async fn list_results_for_student_impl(&self, student_id: i64) -> Result<Vec<ResultRow>> {
        let rows = results::Entity::find()
            .filter(results::Column::StudentId.eq(student_id))
            .order_by_asc(results::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut exam_ids: Vec<i64> = rows.iter().map(|r| r.exam_id).collect();
        exam_ids.sort_unstable();
        exam_ids.dedup();
        let exams: HashMap<i64, _> = exams::Entity::find()
            .filter(exams::Column::Id.is_in(exam_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询关联考试失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_exam()))
            .collect();

        let mut offering_ids: Vec<i64> = rows.iter().map(|r| r.class_subject_id).collect();
        offering_ids.sort_unstable();
        offering_ids.dedup();
        let offerings: HashMap<i64, _> = class_subjects::Entity::find()
            .filter(class_subjects::Column::Id.is_in(offering_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询关联开课失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_class_subject()))
            .collect();

        let subjects = self
            .load_subjects(offerings.values().map(|o| o.subject_id))
            .await?;
        let classes = self
            .load_class_summaries(offerings.values().map(|o| o.class_id))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let exam = exams.get(&r.exam_id).cloned();
                let class_subject = offerings.get(&r.class_subject_id).cloned();
                let subject = class_subject
                    .as_ref()
                    .and_then(|o| subjects.get(&o.subject_id).cloned());
                let class = class_subject
                    .as_ref()
                    .and_then(|o| classes.get(&o.class_id).cloned());
                ResultRow {
                    entry: r.into_result_entry(),
                    exam,
                    class_subject,
                    subject,
                    class,
                }
            })
            .collect())
    }
}
