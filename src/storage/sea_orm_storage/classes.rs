//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model};
use crate::errors::{Result, SchoolError};
use crate::models::classes::{
    entities::{Class, ClassDetail, Section},
    requests::NewClass,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, class: NewClass) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(class.name),
            section: Set(class.section.to_string()),
            incharge_id: Set(class.incharge_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建班级失败", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过名称与分组获取班级
    pub async fn get_class_by_name_and_section_impl(
        &self,
        name: &str,
        section: Section,
    ) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Name.eq(name))
            .filter(Column::Section.eq(section.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 获取带班主任信息的班级
    pub async fn get_class_detail_impl(&self, class_id: i64) -> Result<Option<ClassDetail>> {
        let Some(class) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut details = self.attach_incharges(vec![class]).await?;
        Ok(details.pop())
    }

    /// 列出班级
    pub async fn list_classes_impl(&self) -> Result<Vec<ClassDetail>> {
        let classes = Classes::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Section)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级列表失败: {e}")))?;

        self.attach_incharges(classes).await
    }

    /// 指派班主任
    pub async fn update_class_incharge_impl(
        &self,
        class_id: i64,
        incharge_id: i64,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.incharge_id = Set(Some(incharge_id));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新班主任失败", e))?;

        Ok(Some(updated.into_class()))
    }

    /// 批量加载班主任
    async fn attach_incharges(&self, classes: Vec<Model>) -> Result<Vec<ClassDetail>> {
        let incharges = self
            .load_user_summaries(classes.iter().filter_map(|c| c.incharge_id))
            .await?;

        Ok(classes
            .into_iter()
            .map(|c| {
                let incharge = c.incharge_id.and_then(|id| incharges.get(&id).cloned());
                c.into_detail(incharge)
            })
            .collect())
    }
}
