//! 开课存储操作

use super::SeaOrmStorage;
use crate::entity::class_subjects::{ActiveModel, Column, Entity as ClassSubjects};
use crate::entity::results;
use crate::errors::{Result, SchoolError};
use crate::models::class_subjects::{
    entities::{ClassSubject, ClassSubjectDetail},
    requests::{ClassSubjectQuery, ClassSubjectUpdate, NewClassSubject},
};
use crate::services::results::grading::grade;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

fn txn_error(e: sea_orm::DbErr) -> SchoolError {
    SchoolError::database_operation(format!("开课事务失败: {e}"))
}

impl SeaOrmStorage {
    /// 创建开课
    pub async fn create_class_subject_impl(
        &self,
        class_subject: NewClassSubject,
    ) -> Result<ClassSubject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(class_subject.subject_id),
            class_id: Set(class_subject.class_id),
            teacher_id: Set(class_subject.teacher_id),
            max_marks: Set(class_subject.max_marks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建开课失败", e))?;

        Ok(result.into_class_subject())
    }

    pub async fn get_class_subject_by_id_impl(&self, id: i64) -> Result<Option<ClassSubject>> {
        let result = ClassSubjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询开课失败: {e}")))?;

        Ok(result.map(|m| m.into_class_subject()))
    }

    pub async fn get_class_subject_by_subject_and_class_impl(
        &self,
        subject_id: i64,
        class_id: i64,
    ) -> Result<Option<ClassSubject>> {
        let result = ClassSubjects::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ClassId.eq(class_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询开课失败: {e}")))?;

        Ok(result.map(|m| m.into_class_subject()))
    }

    /// 更新开课（教师或满分）
    ///
    /// 修改满分时在同一事务内检查已录入成绩：低于最高得分则拒绝，
    /// 否则按新满分重算该开课下所有成绩的等级。
    pub async fn update_class_subject_impl(
        &self,
        id: i64,
        update: ClassSubjectUpdate,
    ) -> Result<Option<ClassSubject>> {
        let txn = self.db.begin().await.map_err(txn_error)?;

        let Some(existing) = ClassSubjects::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询开课失败: {e}")))?
        else {
            txn.rollback().await.map_err(txn_error)?;
            return Ok(None);
        };

        let recorded = match update.max_marks {
            Some(_) => results::Entity::find()
                .filter(results::Column::ClassSubjectId.eq(id))
                .all(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询开课成绩失败: {e}")))?,
            None => Vec::new(),
        };

        if let Some(max_marks) = update.max_marks {
            let highest = recorded
                .iter()
                .map(|r| r.marks_obtained)
                .fold(f64::NEG_INFINITY, f64::max);
            if highest > max_marks {
                txn.rollback().await.map_err(txn_error)?;
                return Err(SchoolError::validation(format!(
                    "maxMarks {max_marks} is below recorded marks {highest}"
                )));
            }
        }

        let mut model: ActiveModel = existing.into();
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(max_marks);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| SchoolError::from_db("更新开课失败", e))?;

        for row in recorded {
            let regraded = grade(row.marks_obtained, updated.max_marks).to_string();
            if row.grade == regraded {
                continue;
            }
            let mut row: results::ActiveModel = row.into();
            row.grade = Set(regraded);
            row.update(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("重算成绩等级失败: {e}")))?;
        }

        txn.commit().await.map_err(txn_error)?;

        Ok(Some(updated.into_class_subject()))
    }

    /// 列出开课，关联科目、班级与教师
    pub async fn list_class_subjects_impl(
        &self,
        query: ClassSubjectQuery,
    ) -> Result<Vec<ClassSubjectDetail>> {
        let mut select = ClassSubjects::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let rows = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询开课列表失败: {e}")))?;

        let subjects = self.load_subjects(rows.iter().map(|r| r.subject_id)).await?;
        let classes = self
            .load_class_summaries(rows.iter().map(|r| r.class_id))
            .await?;
        let teachers = self
            .load_user_summaries(rows.iter().map(|r| r.teacher_id))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| ClassSubjectDetail {
                id: r.id,
                max_marks: r.max_marks,
                subject: subjects.get(&r.subject_id).cloned(),
                class: classes.get(&r.class_id).cloned(),
                teacher: teachers.get(&r.teacher_id).cloned(),
            })
            .collect())
    }

    /// 教师是否在该班级有开课
    pub async fn teacher_teaches_class_impl(&self, teacher_id: i64, class_id: i64) -> Result<bool> {
        let count = ClassSubjects::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询开课失败: {e}")))?;

        Ok(count > 0)
    }
}
