//! Existing controls over a risk. Quadrant reductions are checked to 0–2.

use sea_orm::entity::prelude::*;

use crate::domain::RiskControl;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "risk_controls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub risk_id: i32,
    pub control_type: Option<String>,
    pub has_mechanism: bool,
    pub has_manuals: bool,
    pub control_effective: bool,
    pub responsible_defined: bool,
    pub control_frequency_adequate: bool,
    pub control_rating: Option<f64>,
    pub preventive_controls_avg: Option<f64>,
    pub reduce_likelihood_quadrants: i32,
    pub corrective_controls_avg: Option<f64>,
    pub reduce_impact_quadrants: i32,
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

impl From<Model> for RiskControl {
    fn from(model: Model) -> Self {
        RiskControl {
            id: model.id,
            risk_id: model.risk_id,
            control_type: model.control_type,
            has_mechanism: model.has_mechanism,
            has_manuals: model.has_manuals,
            control_effective: model.control_effective,
            responsible_defined: model.responsible_defined,
            control_frequency_adequate: model.control_frequency_adequate,
            control_rating: model.control_rating,
            preventive_controls_avg: model.preventive_controls_avg,
            reduce_likelihood_quadrants: model.reduce_likelihood_quadrants,
            corrective_controls_avg: model.corrective_controls_avg,
            reduce_impact_quadrants: model.reduce_impact_quadrants,
        }
    }
}
