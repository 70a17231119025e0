//! 学生存储操作
//!
//! 学生由账号行与学籍行组成，创建、修改、删除都在同一事务内完成。

use super::SeaOrmStorage;
use crate::entity::{results, students, users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    students::{
        entities::{Student, StudentDetail},
        requests::{NewStudent, StudentUpdate},
    },
    users::entities::{User, UserRole},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

fn txn_error(e: sea_orm::DbErr) -> SchoolError {
    SchoolError::database_operation(format!("学生事务失败: {e}"))
}

impl SeaOrmStorage {
    /// 创建学生账号与学籍
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<(User, Student)> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await.map_err(txn_error)?;

        let user = users::ActiveModel {
            username: Set(student.username),
            email: Set(student.email),
            password_hash: Set(student.password_hash),
            role: Set(UserRole::Student.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::from_db("创建学生账号失败", e))?;

        let record = students::ActiveModel {
            user_id: Set(user.id),
            enrollment_number: Set(student.enrollment_number),
            class_id: Set(student.class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::from_db("创建学籍失败", e))?;

        txn.commit().await.map_err(txn_error)?;

        Ok((user.into_user(), record.into_student()))
    }

    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = students::Entity::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_enrollment_number_impl(
        &self,
        enrollment_number: &str,
    ) -> Result<Option<Student>> {
        let result = students::Entity::find()
            .filter(students::Column::EnrollmentNumber.eq(enrollment_number))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出学生（按学号排序），关联账号与班级
    pub async fn list_students_impl(&self, class_id: Option<i64>) -> Result<Vec<StudentDetail>> {
        let mut select = students::Entity::find();
        if let Some(class_id) = class_id {
            select = select.filter(students::Column::ClassId.eq(class_id));
        }

        let rows = select
            .order_by_asc(students::Column::EnrollmentNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        let accounts = self
            .load_user_summaries(rows.iter().map(|r| r.user_id))
            .await?;
        let classes = self
            .load_class_summaries(rows.iter().map(|r| r.class_id))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| StudentDetail {
                id: r.id,
                enrollment_number: r.enrollment_number,
                user: accounts.get(&r.user_id).cloned(),
                class: classes.get(&r.class_id).cloned(),
            })
            .collect())
    }

    /// 更新学生，账号字段与学籍字段一起提交
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: StudentUpdate,
    ) -> Result<Option<Student>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await.map_err(txn_error)?;

        let Some(existing) = students::Entity::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?
        else {
            txn.rollback().await.map_err(txn_error)?;
            return Ok(None);
        };

        if update.touches_user() {
            let account = users::Entity::find_by_id(existing.user_id)
                .one(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询学生账号失败: {e}")))?
                .ok_or_else(|| SchoolError::not_found("Student account not found"))?;

            let mut account: users::ActiveModel = account.into();
            if let Some(username) = update.username {
                account.username = Set(username);
            }
            if let Some(email) = update.email {
                account.email = Set(email);
            }
            if let Some(password_hash) = update.password_hash {
                account.password_hash = Set(password_hash);
            }
            account.updated_at = Set(now);
            account
                .update(&txn)
                .await
                .map_err(|e| SchoolError::from_db("更新学生账号失败", e))?;
        }

        let mut record: students::ActiveModel = existing.into();
        if let Some(enrollment_number) = update.enrollment_number {
            record.enrollment_number = Set(enrollment_number);
        }
        if let Some(class_id) = update.class_id {
            record.class_id = Set(class_id);
        }
        record.updated_at = Set(now);
        let updated = record
            .update(&txn)
            .await
            .map_err(|e| SchoolError::from_db("更新学籍失败", e))?;

        txn.commit().await.map_err(txn_error)?;

        Ok(Some(updated.into_student()))
    }

    /// 删除学生：成绩、学籍、账号依次删除
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(txn_error)?;

        let Some(existing) = students::Entity::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?
        else {
            txn.rollback().await.map_err(txn_error)?;
            return Ok(false);
        };

        results::Entity::delete_many()
            .filter(results::Column::StudentId.eq(existing.id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生成绩失败: {e}")))?;

        students::Entity::delete_by_id(existing.id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学籍失败: {e}")))?;

        users::Entity::delete_by_id(existing.user_id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生账号失败: {e}")))?;

        txn.commit().await.map_err(txn_error)?;

        Ok(true)
    }
}
