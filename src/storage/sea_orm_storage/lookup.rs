//! 关联数据批量加载
//!
//! 列表查询先取主表，再按 id 集合一次性取回关联行，避免逐行查询。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{classes, subjects, users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    classes::entities::ClassSummary, subjects::entities::Subject, users::entities::UserSummary,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl SeaOrmStorage {
    pub(super) async fn load_user_summaries(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, UserSummary>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = users::Entity::find()
            .filter(users::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询关联用户失败: {e}")))?;
        Ok(rows.into_iter().map(|m| (m.id, m.into_summary())).collect())
    }

    pub(super) async fn load_class_summaries(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, ClassSummary>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = classes::Entity::find()
            .filter(classes::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询关联班级失败: {e}")))?;
        Ok(rows.into_iter().map(|m| (m.id, m.into_summary())).collect())
    }

    pub(super) async fn load_subjects(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, Subject>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询关联科目失败: {e}")))?;
        Ok(rows.into_iter().map(|m| (m.id, m.into_subject())).collect())
    }
}
