use sea_orm::entity::prelude::*;

use crate::domain::{Evaluation, LatestEvaluation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub software_id: i32,
    pub date: DateTimeUtc,
    pub global_score_percentage: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::software::Entity",
        from = "Column::SoftwareId",
        to = "super::software::Column::Id",
        on_delete = "Cascade"
    )]
    Software,
    #[sea_orm(has_many = "super::evaluation_detail::Entity")]
    Details,
    #[sea_orm(has_many = "super::evaluation_characteristic_summary::Entity")]
    CharacteristicSummaries,
}

impl Related<super::software::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Software.def()
    }
}

impl Related<super::evaluation_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl Related<super::evaluation_characteristic_summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharacteristicSummaries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Evaluation {
    fn from(model: Model) -> Self {
        Evaluation {
            id: model.id,
            software_id: model.software_id,
            date: model.date,
            global_score_percentage: model.global_score_percentage,
        }
    }
}

impl From<Model> for LatestEvaluation {
    fn from(model: Model) -> Self {
        LatestEvaluation {
            id: model.id,
            date: model.date,
            global_score_percentage: model.global_score_percentage,
        }
    }
}
