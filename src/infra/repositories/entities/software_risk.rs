//! Risk register entry of a project.

use sea_orm::entity::prelude::*;

use crate::domain::SoftwareRisk;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "software_risks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub software_id: i32,
    pub risk_code: String,
    pub identified_at: Option<Date>,
    pub title: String,
    pub description: Option<String>,
    pub causes: Option<String>,
    pub affects_critical_infrastructure: bool,
    pub process: Option<String>,
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
    #[sea_orm(has_one = "super::risk_ownership::Entity")]
    Ownership,
    #[sea_orm(has_one = "super::risk_classification::Entity")]
    Classification,
    #[sea_orm(has_one = "super::risk_evaluation::Entity")]
    Evaluation,
    #[sea_orm(has_one = "super::risk_control::Entity")]
    Controls,
    #[sea_orm(has_many = "super::risk_mitigation::Entity")]
    Mitigations,
}

impl Related<super::software::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Software.def()
    }
}

impl Related<super::risk_ownership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ownership.def()
    }
}

impl Related<super::risk_classification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classification.def()
    }
}

impl Related<super::risk_evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::risk_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Controls.def()
    }
}

impl Related<super::risk_mitigation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mitigations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SoftwareRisk {
    fn from(model: Model) -> Self {
        SoftwareRisk {
            id: model.id,
            software_id: model.software_id,
            risk_code: model.risk_code,
            identified_at: model.identified_at,
            title: model.title,
            description: model.description,
            causes: model.causes,
            affects_critical_infrastructure: model.affects_critical_infrastructure,
            process: model.process,
        }
    }
}
