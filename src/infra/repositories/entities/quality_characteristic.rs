//! Rubric characteristic entity. `weight_percentage` is checked to 0–100.

use sea_orm::entity::prelude::*;

use crate::domain::Characteristic;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quality_characteristics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub weight_percentage: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subcharacteristic::Entity")]
    Subcharacteristics,
}

impl Related<super::subcharacteristic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcharacteristics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Characteristic {
    fn from(model: Model) -> Self {
        Characteristic {
            id: model.id,
            name: model.name,
            description: model.description,
            weight_percentage: model.weight_percentage,
        }
    }
}
