//! Software project entity. `(user_id, name)` is unique.

use sea_orm::entity::prelude::*;

use crate::domain::Software;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "software")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub city: String,
    pub general_objective: String,
    pub description: String,
    pub version: String,
    pub registered_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::software_participant::Entity")]
    Participants,
    #[sea_orm(has_many = "super::evaluation::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::software_risk::Entity")]
    Risks,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::software_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::software_risk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Risks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Software {
    fn from(model: Model) -> Self {
        Software {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            city: model.city,
            general_objective: model.general_objective,
            description: model.description,
            version: model.version,
            registered_at: model.registered_at,
        }
    }
}
