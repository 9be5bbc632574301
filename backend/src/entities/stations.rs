use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::monitoring::{self, StationStatus};
use crate::schedule;

/// A single radio station.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
    pub frequency: Option<f64>,
    #[sea_orm(unique)]
    pub api_key: String,
    pub owner_id: Option<Uuid>,
    pub network_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub cloud_phone_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub transmitter_phone_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::networks::Entity",
        from = "Column::NetworkId",
        to = "super::networks::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Network,
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::phone_numbers::Entity",
        from = "Column::CloudPhoneId",
        to = "super::phone_numbers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    CloudPhone,
    #[sea_orm(
        belongs_to = "super::phone_numbers::Entity",
        from = "Column::TransmitterPhoneId",
        to = "super::phone_numbers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    TransmitterPhone,
    #[sea_orm(has_many = "super::scheduled_blocks::Entity")]
    ScheduledBlocks,
    #[sea_orm(has_many = "super::scheduled_programs::Entity")]
    ScheduledPrograms,
    #[sea_orm(has_many = "super::station_analytics::Entity")]
    StationAnalytics,
    #[sea_orm(has_many = "super::roles::Entity")]
    Roles,
    #[sea_orm(has_many = "super::station_languages::Entity")]
    StationLanguages,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::networks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Network.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::scheduled_blocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledBlocks.def()
    }
}

impl Related<super::scheduled_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledPrograms.def()
    }
}

impl Related<super::station_analytics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StationAnalytics.def()
    }
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roles.def()
    }
}

impl Related<super::station_languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StationLanguages.def()
    }
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        super::station_languages::Relation::Language.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::station_languages::Relation::Station.def().rev())
    }
}

/// The number a station's cloud service dials from.
pub struct CloudPhoneLink;

impl Linked for CloudPhoneLink {
    type FromEntity = Entity;
    type ToEntity = super::phone_numbers::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::CloudPhone.def()]
    }
}

/// The number attached to a station's transmitter.
pub struct TransmitterPhoneLink;

impl Linked for TransmitterPhoneLink {
    type FromEntity = Entity;
    type ToEntity = super::phone_numbers::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::TransmitterPhone.def()]
    }
}

/// A fresh key for every inserted station; keys are never shared between rows.
pub fn generate_api_key() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.api_key.is_not_set() {
            self.api_key = Set(generate_api_key());
        }
        Ok(self)
    }
}

impl Model {
    pub async fn languages<C>(&self, db: &C) -> Result<Vec<super::languages::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::languages::Entity).all(db).await
    }

    pub async fn cloud_phone<C>(&self, db: &C) -> Result<Option<super::phone_numbers::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_linked(CloudPhoneLink).one(db).await
    }

    pub async fn transmitter_phone<C>(&self, db: &C) -> Result<Option<super::phone_numbers::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_linked(TransmitterPhoneLink).one(db).await
    }

    /// Phone numbers attached to the station in either role.
    pub fn phone_ids(&self) -> Vec<Uuid> {
        self.cloud_phone_id
            .into_iter()
            .chain(self.transmitter_phone_id)
            .collect()
    }

    pub async fn current_program<C>(&self, db: &C) -> Result<Option<super::scheduled_programs::Model>, Error>
    where
        C: ConnectionTrait,
    {
        schedule::current_program(db, self.id, chrono::Utc::now()).await
    }

    pub async fn next_program<C>(&self, db: &C) -> Result<Option<super::scheduled_programs::Model>, Error>
    where
        C: ConnectionTrait,
    {
        schedule::next_program(db, self.id, chrono::Utc::now()).await
    }

    pub async fn current_block<C>(&self, db: &C) -> Result<Option<super::scheduled_blocks::Model>, Error>
    where
        C: ConnectionTrait,
    {
        schedule::current_block(db, self.id, chrono::Utc::now()).await
    }

    pub async fn status<C>(&self, db: &C, heartbeat: std::time::Duration) -> Result<StationStatus, Error>
    where
        C: ConnectionTrait,
    {
        monitoring::status(db, self.id, chrono::Utc::now(), heartbeat).await
    }
}
