use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A reusable description of how a program is put together.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "program_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub definition: ProgramDefinition,
}

/// Structure of a program type, tagged with the schema version it was
/// written against so older rows stay readable as the format grows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(tag = "version")]
pub enum ProgramDefinition {
    #[serde(rename = "1")]
    V1 { segments: Vec<Segment> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Playback of an episode recording.
    Prerecorded { duration_secs: u32 },
    /// Presenter on air.
    Live { duration_secs: u32 },
    /// Listener call-in window.
    CallIn {
        duration_secs: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_callers: Option<u32>,
    },
    /// Slot filled from the block's padding content.
    Padding { duration_secs: u32 },
}

impl Segment {
    pub fn duration_secs(&self) -> u32 {
        match self {
            Segment::Prerecorded { duration_secs }
            | Segment::Live { duration_secs }
            | Segment::CallIn { duration_secs, .. }
            | Segment::Padding { duration_secs } => *duration_secs,
        }
    }
}

impl ProgramDefinition {
    pub fn segments(&self) -> &[Segment] {
        match self {
            ProgramDefinition::V1 { segments } => segments,
        }
    }

    pub fn total_duration(&self) -> chrono::Duration {
        let secs: i64 = self
            .segments()
            .iter()
            .map(|s| i64::from(s.duration_secs()))
            .sum();
        chrono::Duration::seconds(secs)
    }
}

impl Default for ProgramDefinition {
    fn default() -> Self {
        ProgramDefinition::V1 {
            segments: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::programs::Entity")]
    Programs,
}

impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Programs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
