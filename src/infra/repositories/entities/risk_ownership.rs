use sea_orm::entity::prelude::*;

use crate::domain::RiskOwnership;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "risk_ownership")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub risk_id: i32,
    pub owner_name: String,
    pub owner_role: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::software_risk::Entity",
        from = "Column::RiskId",
        to = "super::software_risk::Column::Id",
        on_delete = "Cascade"
    )]
    Risk,
}

impl Related<super::software_risk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Risk.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RiskOwnership {
    fn from(model: Model) -> Self {
        RiskOwnership {
            id: model.id,
            risk_id: model.risk_id,
            owner_name: model.owner_name,
            owner_role: model.owner_role,
        }
    }
}
