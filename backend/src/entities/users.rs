use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// An account that can own stations and administer networks.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stations::Entity")]
    OwnedStations,
    #[sea_orm(has_many = "super::network_admins::Entity")]
    NetworkAdmins,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnedStations.def()
    }
}

impl Related<super::network_admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkAdmins.def()
    }
}

impl Related<super::networks::Entity> for Entity {
    fn to() -> RelationDef {
        super::network_admins::Relation::Network.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::network_admins::Relation::User.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
