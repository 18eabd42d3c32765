//! Mitigation plan of a risk. Code, description and zone are copies of the
//! risk's values when the plan was recorded.

use sea_orm::entity::prelude::*;

use crate::domain::{ResponseType, RiskMitigation};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "risk_mitigation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub risk_id: i32,
    pub evaluation_id: Option<i32>,
    pub ownership_id: Option<i32>,
    pub risk_code: Option<String>,
    pub risk_description: Option<String>,
    pub risk_zone: Option<String>,
    pub responsible: Option<String>,
    pub phase: Option<String>,
    pub response_type: String,
    pub mitigation_plan: Option<String>,
    pub registered_at: DateTimeUtc,
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
    #[sea_orm(
        belongs_to = "super::risk_evaluation::Entity",
        from = "Column::EvaluationId",
        to = "super::risk_evaluation::Column::Id",
        on_delete = "Cascade"
    )]
    Evaluation,
    #[sea_orm(
        belongs_to = "super::risk_ownership::Entity",
        from = "Column::OwnershipId",
        to = "super::risk_ownership::Column::Id",
        on_delete = "SetNull"
    )]
    Ownership,
}

impl Related<super::software_risk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Risk.def()
    }
}

impl Related<super::risk_evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::risk_ownership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ownership.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for RiskMitigation {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(RiskMitigation {
            id: model.id,
            risk_id: model.risk_id,
            evaluation_id: model.evaluation_id,
            ownership_id: model.ownership_id,
            risk_code: model.risk_code,
            risk_description: model.risk_description,
            risk_zone: model.risk_zone,
            responsible: model.responsible,
            phase: model.phase,
            response_type: model.response_type.parse::<ResponseType>()?,
            mitigation_plan: model.mitigation_plan,
            registered_at: model.registered_at,
        })
    }
}
