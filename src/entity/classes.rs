//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub section: String,
    pub incharge_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InchargeId",
        to = "super::users::Column::Id"
    )]
    Incharge,
    #[sea_orm(has_many = "super::class_subjects::Entity")]
    ClassSubjects,
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incharge.def()
    }
}

impl Related<super::class_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSubjects.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exams.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    fn parsed_section(&self) -> crate::models::classes::entities::Section {
        use crate::models::classes::entities::Section;
        // 写入前已校验，这里只兜底
        self.section.parse().unwrap_or(Section::A)
    }

    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::Class;
        use chrono::{DateTime, Utc};

        Class {
            id: self.id,
            section: self.parsed_section(),
            name: self.name,
            incharge_id: self.incharge_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }

    pub fn into_summary(self) -> crate::models::classes::entities::ClassSummary {
        crate::models::classes::entities::ClassSummary {
            id: self.id,
            section: self.parsed_section(),
            name: self.name,
        }
    }

    pub fn into_detail(
        self,
        incharge: Option<crate::models::users::entities::UserSummary>,
    ) -> crate::models::classes::entities::ClassDetail {
        use crate::models::classes::entities::ClassDetail;
        use chrono::{DateTime, Utc};

        ClassDetail {
            id: self.id,
            section: self.parsed_section(),
            name: self.name,
            incharge,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
