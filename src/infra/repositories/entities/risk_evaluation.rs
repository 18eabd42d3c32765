//! Inherent risk rating. Likelihood and impact are stored as levels 1–5.

use sea_orm::entity::prelude::*;

use crate::domain::{Impact, Likelihood, RiskEvaluation};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "risk_evaluation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub risk_id: i32,
    pub likelihood: i32,
    pub impact: i32,
    pub risk_zone: Option<String>,
    pub acceptance: Option<String>,
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

impl TryFrom<Model> for RiskEvaluation {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(RiskEvaluation {
            id: model.id,
            risk_id: model.risk_id,
            likelihood: Likelihood::try_from(model.likelihood)?,
            impact: Impact::try_from(model.impact)?,
            risk_zone: model.risk_zone,
            acceptance: model.acceptance,
        })
    }
}
