//! Rubric subcharacteristic entity. `max_score` is checked to be positive.

use sea_orm::entity::prelude::*;

use crate::domain::Subcharacteristic;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subcharacteristics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub characteristic_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub max_score: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quality_characteristic::Entity",
        from = "Column::CharacteristicId",
        to = "super::quality_characteristic::Column::Id",
        on_delete = "Cascade"
    )]
    Characteristic,
}

impl Related<super::quality_characteristic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Characteristic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subcharacteristic {
    fn from(model: Model) -> Self {
        Subcharacteristic {
            id: model.id,
            characteristic_id: model.characteristic_id,
            name: model.name,
            description: model.description,
            max_score: model.max_score,
        }
    }
}
