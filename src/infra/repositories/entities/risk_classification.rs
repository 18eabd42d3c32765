//! Risk category and the security properties it threatens. `risk_type`
//! holds the Spanish label of [`RiskType`].

use sea_orm::entity::prelude::*;

use crate::domain::{RiskClassification, RiskType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "risk_classification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub risk_id: i32,
    pub risk_type: String,
    pub confidentiality: bool,
    pub integrity: bool,
    pub availability: bool,
    pub impact_type: Option<String>,
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

impl TryFrom<Model> for RiskClassification {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(RiskClassification {
            id: model.id,
            risk_id: model.risk_id,
            risk_type: model.risk_type.parse::<RiskType>()?,
            confidentiality: model.confidentiality,
            integrity: model.integrity,
            availability: model.availability,
            impact_type: model.impact_type,
        })
    }
}
