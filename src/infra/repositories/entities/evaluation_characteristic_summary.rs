//! Per-characteristic rollup with the characteristic name and weight copied
//! at evaluation time.

use sea_orm::entity::prelude::*;

use crate::domain::CharacteristicSummary;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_characteristic_summary")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub evaluation_id: i32,
    pub characteristic_id: Option<i32>,
    pub value: i32,
    pub max_value: i32,
    pub result_percentage: f64,
    pub weighted_percentage: f64,
    pub characteristic_name: String,
    pub weight_percentage: f64,
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
        belongs_to = "super::quality_characteristic::Entity",
        from = "Column::CharacteristicId",
        to = "super::quality_characteristic::Column::Id",
        on_delete = "SetNull"
    )]
    Characteristic,
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::quality_characteristic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Characteristic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CharacteristicSummary {
    fn from(model: Model) -> Self {
        CharacteristicSummary {
            id: model.id,
            evaluation_id: model.evaluation_id,
            characteristic_id: model.characteristic_id,
            value: model.value,
            max_value: model.max_value,
            result_percentage: model.result_percentage,
            weighted_percentage: model.weighted_percentage,
            characteristic_name: model.characteristic_name,
            weight_percentage: model.weight_percentage,
        }
    }
}
