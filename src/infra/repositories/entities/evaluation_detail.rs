//! Per-subcharacteristic score. `score` is checked to 0–3; the name,
//! description and max score are copies taken when the row was written.

use sea_orm::entity::prelude::*;

use crate::domain::EvaluationDetail;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub evaluation_id: i32,
    pub subcharacteristic_id: Option<i32>,
    pub score: i16,
    pub comment: Option<String>,
    pub subcharacteristic_name: String,
    pub subcharacteristic_description: Option<String>,
    pub max_score: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluation::Column::Id",
        on_delete = "Cascade"
    )]
    Evaluation,
    #[sea_orm(
        belongs_to = "super::subcharacteristic::Entity",
        from = "Column::SubcharacteristicId",
        to = "super::subcharacteristic::Column::Id",
        on_delete = "SetNull"
    )]
    Subcharacteristic,
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::subcharacteristic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcharacteristic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EvaluationDetail {
    fn from(model: Model) -> Self {
        EvaluationDetail {
            id: model.id,
            evaluation_id: model.evaluation_id,
            subcharacteristic_id: model.subcharacteristic_id,
            score: model.score,
            comment: model.comment,
            subcharacteristic_name: model.subcharacteristic_name,
            subcharacteristic_description: model.subcharacteristic_description,
            max_score: model.max_score,
        }
    }
}
