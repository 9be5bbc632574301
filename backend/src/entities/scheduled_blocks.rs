use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::recurrence::{RecurrenceError, RecurrenceRule};

/// A recurring daypart on a station: a time-of-day window that is active on
/// the dates produced by its recurrence rule.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scheduled_blocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub station_id: Uuid,
    pub name: String,
    /// RRULE text (RFC 2445 §4.8.5.4). `None` means every day.
    #[sea_orm(column_type = "Text", nullable)]
    pub recurrence: Option<String>,
    pub start_time: Time,
    pub end_time: Time,
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
    #[sea_orm(has_many = "super::padding_contents::Entity")]
    PaddingContents,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl Related<super::padding_contents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaddingContents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Blocks starting at or after `time`.
    pub fn after(time: Time) -> Select<Entity> {
        Self::find()
            .filter(Column::StartTime.gte(time))
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
    }

    /// Blocks ending at or before `time`.
    pub fn before(time: Time) -> Select<Entity> {
        Self::find()
            .filter(Column::EndTime.lte(time))
            .order_by_asc(Column::EndTime)
            .order_by_asc(Column::Id)
    }

    /// Blocks strictly inside `(start, end)`.
    pub fn between(start: Time, end: Time) -> Select<Entity> {
        Self::find()
            .filter(
                Condition::all()
                    .add(Column::StartTime.gt(start))
                    .add(Column::EndTime.lt(end)),
            )
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
    }

    /// Blocks whose window covers `time`, bounds included. The recurrence
    /// rule is not consulted; see [`Model::occurs_on`].
    pub fn contains(time: Time) -> Select<Entity> {
        Self::find().filter(
            Condition::all()
                .add(Column::StartTime.lte(time))
                .add(Column::EndTime.gte(time)),
        )
    }
}

impl Model {
    pub fn rule(&self) -> Result<Option<RecurrenceRule>, RecurrenceError> {
        self.recurrence.as_deref().map(str::parse).transpose()
    }

    /// Whether the block is active on `date`. A block without a rule runs
    /// daily; a block whose rule does not parse never runs.
    pub fn occurs_on(&self, date: Date) -> bool {
        match self.rule() {
            Ok(Some(rule)) => rule.occurs_on(date),
            Ok(None) => true,
            Err(err) => {
                tracing::warn!(block_id = %self.id, error = %err, "ignoring block with invalid recurrence");
                false
            }
        }
    }
}
