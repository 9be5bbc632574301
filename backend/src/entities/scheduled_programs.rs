use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// Content scheduled to air on a station between two instants.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scheduled_programs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub station_id: Uuid,
    pub program_id: Uuid,
    pub start: DateTimeUtc,
    pub end: DateTimeUtc,
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
    #[sea_orm(
        belongs_to = "super::programs::Entity",
        from = "Column::ProgramId",
        to = "super::programs::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Program,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Rows starting at or after `at`, earliest first.
    pub fn after(at: DateTimeUtc) -> Select<Entity> {
        Self::find()
            .filter(Column::Start.gte(at))
            .order_by_asc(Column::Start)
            .order_by_asc(Column::Id)
    }

    /// Rows ending at or before `at`, earliest first.
    pub fn before(at: DateTimeUtc) -> Select<Entity> {
        Self::find()
            .filter(Column::End.lte(at))
            .order_by_asc(Column::End)
            .order_by_asc(Column::Id)
    }

    /// Rows that lie entirely inside `[start, end]`.
    pub fn between(start: DateTimeUtc, end: DateTimeUtc) -> Select<Entity> {
        Self::find()
            .filter(Column::Start.gte(start))
            .filter(Column::End.lte(end))
            .order_by_asc(Column::Start)
            .order_by_asc(Column::Id)
    }

    /// Rows airing at `at`, bounds included.
    pub fn contains(at: DateTimeUtc) -> Select<Entity> {
        Self::find()
            .filter(Column::Start.lte(at))
            .filter(Column::End.gte(at))
    }
}

impl Model {
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}
