use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// One health report from a station's on-site hardware.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "station_analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub station_id: Uuid,
    pub created_time: DateTimeUtc,
    /// Percent, 0 to 100.
    pub battery_level: Option<f64>,
    /// Load average; 1.0 means fully loaded.
    pub cpu_load: Option<f64>,
    /// Percent, 0 to 100.
    pub memory_utilization: Option<f64>,
    /// Percent, 0 to 100.
    pub storage_usage: Option<f64>,
    /// Signal strength as reported by the modem.
    pub gsm_connectivity: Option<f64>,
    pub headphone_plug: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stations::Entity",
        from = "Column::StationId",
        to = "super::stations::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Station,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.created_time.is_not_set() {
            self.created_time = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
