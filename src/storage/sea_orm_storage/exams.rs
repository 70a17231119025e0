//! 考试存储操作

use super::SeaOrmStorage;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{Result, SchoolError};
use crate::models::exams::{
    entities::{Exam, ExamDetail},
    requests::NewExam,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建考试
    pub async fn create_exam_impl(&self, exam: NewExam) -> Result<Exam> {
        let model = ActiveModel {
            name: Set(exam.name),
            class_id: Set(exam.class_id),
            academic_year: Set(exam.academic_year),
            exam_date: Set(exam.date.timestamp()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建考试失败", e))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, exam_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn get_exam_by_name_class_year_impl(
        &self,
        name: &str,
        class_id: i64,
        academic_year: &str,
    ) -> Result<Option<Exam>> {
        let result = Exams::find()
            .filter(Column::Name.eq(name))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::AcademicYear.eq(academic_year))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 列出考试，按日期排序，可按班级筛选
    pub async fn list_exams_impl(&self, class_id: Option<i64>) -> Result<Vec<ExamDetail>> {
        let mut select = Exams::find();
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let rows = select
            .order_by_asc(Column::ExamDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试列表失败: {e}")))?;

        let classes = self
            .load_class_summaries(rows.iter().map(|r| r.class_id))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let class = classes.get(&r.class_id).cloned();
                r.into_detail(class)
            })
            .collect())
    }
}
