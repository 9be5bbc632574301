use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

use crate::recurrence::{RecurrenceError, RecurrenceRule};

/// A single or recurring radio program.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub duration: Option<Time>,
    /// RRULE text describing when new episodes become available.
    #[sea_orm(column_type = "Text", nullable)]
    pub update_recurrence: Option<String>,
    pub language_id: Option<Uuid>,
    pub program_type_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::languages::Entity",
        from = "Column::LanguageId",
        to = "super::languages::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Language,
    #[sea_orm(
        belongs_to = "super::program_types::Entity",
        from = "Column::ProgramTypeId",
        to = "super::program_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ProgramType,
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
    #[sea_orm(has_many = "super::scheduled_programs::Entity")]
    ScheduledPrograms,
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl Related<super::program_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgramType.def()
    }
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::scheduled_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledPrograms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Episodes of this program, newest first. Nothing is fetched until the
    /// returned query is executed, so callers can paginate large back
    /// catalogs.
    pub fn episodes(&self) -> Select<super::episodes::Entity> {
        self.find_related(super::episodes::Entity)
            .order_by_desc(super::episodes::Column::CreatedTime)
            .order_by_desc(super::episodes::Column::Id)
    }

    pub fn update_rule(&self) -> Result<Option<RecurrenceRule>, RecurrenceError> {
        self.update_recurrence
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}
