//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub class_id: i64,
    pub academic_year: String,
    pub exam_date: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::Exam;
        use chrono::{DateTime, Utc};

        Exam {
            id: self.id,
            name: self.name,
            class_id: self.class_id,
            academic_year: self.academic_year,
            date: DateTime::<Utc>::from_timestamp(self.exam_date, 0).unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }

    pub fn into_detail(
        self,
        class: Option<crate::models::classes::entities::ClassSummary>,
    ) -> crate::models::exams::entities::ExamDetail {
        use crate::models::exams::entities::ExamDetail;
        use chrono::{DateTime, Utc};

        ExamDetail {
            id: self.id,
            name: self.name,
            academic_year: self.academic_year,
            date: DateTime::<Utc>::from_timestamp(self.exam_date, 0).unwrap_or_default(),
            class,
        }
    }
}
