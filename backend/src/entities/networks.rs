use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A network of radio stations.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "networks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stations::Entity")]
    Stations,
    #[sea_orm(has_many = "super::network_admins::Entity")]
    NetworkAdmins,
    #[sea_orm(has_many = "super::network_paddings::Entity")]
    NetworkPaddings,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stations.def()
    }
}

impl Related<super::network_admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkAdmins.def()
    }
}

impl Related<super::network_paddings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkPaddings.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::network_admins::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::network_admins::Relation::Network.def().rev())
    }
}

impl Related<super::padding_contents::Entity> for Entity {
    fn to() -> RelationDef {
        super::network_paddings::Relation::PaddingContent.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::network_paddings::Relation::Network.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
