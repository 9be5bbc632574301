//! Station-level schedule resolution.
//!
//! Overlapping rows are legal. When several programs air at the same instant
//! the one that started most recently wins, and equal starts fall back to the
//! greatest id so the answer is stable across calls. Blocks resolve the same
//! way on their time-of-day window, after filtering by recurrence.
//!
//! All comparisons are in UTC.

use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{scheduled_blocks, scheduled_programs};
use crate::error::{Result, ValidationError};
use crate::recurrence::RecurrenceRule;

/// The program airing on `station_id` at `at`, if any.
pub async fn current_program<C>(
    db: &C,
    station_id: Uuid,
    at: DateTime<Utc>,
) -> Result<Option<scheduled_programs::Model>>
where
    C: ConnectionTrait,
{
    let row = scheduled_programs::Entity::contains(at)
        .filter(scheduled_programs::Column::StationId.eq(station_id))
        .order_by_desc(scheduled_programs::Column::Start)
        .order_by_desc(scheduled_programs::Column::Id)
        .one(db)
        .await?;
    debug!(%station_id, %at, found = row.is_some(), "current program");
    Ok(row)
}

/// The first program on `station_id` starting at or after `at`.
pub async fn next_program<C>(
    db: &C,
    station_id: Uuid,
    at: DateTime<Utc>,
) -> Result<Option<scheduled_programs::Model>>
where
    C: ConnectionTrait,
{
    let row = scheduled_programs::Entity::after(at)
        .filter(scheduled_programs::Column::StationId.eq(station_id))
        .one(db)
        .await?;
    debug!(%station_id, %at, found = row.is_some(), "next program");
    Ok(row)
}

/// Up to `limit` programs starting at or after `at`, in airing order.
pub async fn upcoming_programs<C>(
    db: &C,
    station_id: Uuid,
    at: DateTime<Utc>,
    limit: u64,
) -> Result<Vec<scheduled_programs::Model>>
where
    C: ConnectionTrait,
{
    let rows = scheduled_programs::Entity::after(at)
        .filter(scheduled_programs::Column::StationId.eq(station_id))
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

/// The block active on `station_id` at `at`: its window must cover the time of
/// day and its rule must occur on the date.
pub async fn current_block<C>(
    db: &C,
    station_id: Uuid,
    at: DateTime<Utc>,
) -> Result<Option<scheduled_blocks::Model>>
where
    C: ConnectionTrait,
{
    let candidates = scheduled_blocks::Entity::contains(at.time())
        .filter(scheduled_blocks::Column::StationId.eq(station_id))
        .order_by_desc(scheduled_blocks::Column::StartTime)
        .order_by_desc(scheduled_blocks::Column::Id)
        .all(db)
        .await?;

    let date = at.date_naive();
    let block = candidates.into_iter().find(|block| block.occurs_on(date));
    debug!(%station_id, %at, found = block.is_some(), "current block");
    Ok(block)
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewScheduledBlock {
    pub station_id: Uuid,
    pub name: String,
    pub recurrence: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewScheduledBlock {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Blank { field: "name" });
        }
        if self.start_time >= self.end_time {
            return Err(ValidationError::empty_window(self.start_time, self.end_time));
        }
        if let Some(rule) = &self.recurrence {
            rule.parse::<RecurrenceRule>()?;
        }
        Ok(())
    }
}

pub async fn add_scheduled_block<C>(db: &C, block: NewScheduledBlock) -> Result<scheduled_blocks::Model>
where
    C: ConnectionTrait,
{
    block.validate()?;

    let model = scheduled_blocks::ActiveModel {
        id: Set(Uuid::new_v4()),
        station_id: Set(block.station_id),
        name: Set(block.name),
        recurrence: Set(block.recurrence),
        start_time: Set(block.start_time),
        end_time: Set(block.end_time),
    }
    .insert(db)
    .await?;

    info!(block_id = %model.id, station_id = %model.station_id, "scheduled block added");
    Ok(model)
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewScheduledProgram {
    pub station_id: Uuid,
    pub program_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

pub async fn add_scheduled_program<C>(
    db: &C,
    program: NewScheduledProgram,
) -> Result<scheduled_programs::Model>
where
    C: ConnectionTrait,
{
    if program.start >= program.end {
        return Err(ValidationError::empty_window(program.start, program.end).into());
    }

    let model = scheduled_programs::ActiveModel {
        id: Set(Uuid::new_v4()),
        station_id: Set(program.station_id),
        program_id: Set(program.program_id),
        start: Set(program.start),
        end: Set(program.end),
    }
    .insert(db)
    .await?;

    info!(
        scheduled_program_id = %model.id,
        station_id = %model.station_id,
        start = %model.start,
        "program scheduled"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::{insert_program, insert_station, setup_db};
    use chrono::TimeZone;
    use sea_orm::DatabaseConnection;

    fn jan1(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
    }

    fn tod(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    async fn schedule(
        db: &DatabaseConnection,
        station_id: Uuid,
        program_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> scheduled_programs::Model {
        add_scheduled_program(
            db,
            NewScheduledProgram {
                station_id,
                program_id,
                start,
                end,
            },
        )
        .await
        .unwrap()
    }

    async fn block(
        db: &DatabaseConnection,
        station_id: Uuid,
        recurrence: Option<&str>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> scheduled_blocks::Model {
        add_scheduled_block(
            db,
            NewScheduledBlock {
                station_id,
                name: "Morning".into(),
                recurrence: recurrence.map(str::to_owned),
                start_time: start,
                end_time: end,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn latest_start_wins_when_programs_overlap() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Kampala").await;
        let program = insert_program(&db, "Breakfast").await;

        let p1 = schedule(&db, station.id, program.id, jan1(9, 0), jan1(10, 0)).await;
        let p2 = schedule(&db, station.id, program.id, jan1(9, 30), jan1(10, 30)).await;

        let at = |t| current_program(&db, station.id, t);
        assert_eq!(at(jan1(9, 15)).await.unwrap(), Some(p1.clone()));
        assert_eq!(at(jan1(9, 45)).await.unwrap(), Some(p2.clone()));
        assert_eq!(at(jan1(10, 15)).await.unwrap(), Some(p2));
        assert_eq!(at(jan1(11, 0)).await.unwrap(), None);
        // Both bounds are inclusive.
        assert_eq!(at(jan1(9, 0)).await.unwrap(), Some(p1));
    }

    #[tokio::test]
    async fn equal_starts_resolve_to_greatest_id() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Gulu").await;
        let program = insert_program(&db, "News").await;

        let a = schedule(&db, station.id, program.id, jan1(9, 0), jan1(10, 0)).await;
        let b = schedule(&db, station.id, program.id, jan1(9, 0), jan1(9, 30)).await;
        let expected = if a.id > b.id { a.id } else { b.id };

        for _ in 0..3 {
            let current = current_program(&db, station.id, jan1(9, 10)).await.unwrap();
            assert_eq!(current.map(|p| p.id), Some(expected));
        }
    }

    #[tokio::test]
    async fn next_program_includes_exact_start() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Lira").await;
        let program = insert_program(&db, "Drive").await;

        let first = schedule(&db, station.id, program.id, jan1(11, 0), jan1(12, 0)).await;
        let second = schedule(&db, station.id, program.id, jan1(12, 0), jan1(13, 0)).await;

        let next = next_program(&db, station.id, jan1(10, 45)).await.unwrap();
        assert_eq!(next, Some(first.clone()));
        let next = next_program(&db, station.id, jan1(11, 0)).await.unwrap();
        assert_eq!(next, Some(first));
        let next = next_program(&db, station.id, jan1(11, 1)).await.unwrap();
        assert_eq!(next, Some(second.clone()));
        assert_eq!(next_program(&db, station.id, jan1(12, 1)).await.unwrap(), None);

        let upcoming = upcoming_programs(&db, station.id, jan1(0, 0), 10).await.unwrap();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[1], second);
    }

    #[tokio::test]
    async fn before_and_between_bounds() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Mbale").await;
        let program = insert_program(&db, "Talk").await;
        let row = schedule(&db, station.id, program.id, jan1(9, 0), jan1(10, 0)).await;

        let ended = scheduled_programs::Entity::before(jan1(10, 0)).all(&db).await.unwrap();
        assert_eq!(ended, vec![row.clone()]);
        let ended = scheduled_programs::Entity::before(jan1(9, 59)).all(&db).await.unwrap();
        assert!(ended.is_empty());

        let inside = scheduled_programs::Entity::between(jan1(9, 0), jan1(10, 0))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(inside, vec![row]);
        let inside = scheduled_programs::Entity::between(jan1(9, 1), jan1(10, 0))
            .all(&db)
            .await
            .unwrap();
        assert!(inside.is_empty());
    }

    #[tokio::test]
    async fn results_are_scoped_to_the_station() {
        let db = setup_db().await;
        let ours = insert_station(&db, "Radio Arua").await;
        let theirs = insert_station(&db, "Radio Jinja").await;
        let program = insert_program(&db, "Music").await;
        schedule(&db, theirs.id, program.id, jan1(9, 0), jan1(10, 0)).await;
        block(&db, theirs.id, None, tod(9, 0), tod(10, 0)).await;

        assert_eq!(current_program(&db, ours.id, jan1(9, 30)).await.unwrap(), None);
        assert_eq!(next_program(&db, ours.id, jan1(8, 0)).await.unwrap(), None);
        assert_eq!(current_block(&db, ours.id, jan1(9, 30)).await.unwrap(), None);
        assert!(current_block(&db, theirs.id, jan1(9, 30)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn block_between_is_strict_on_both_ends() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Soroti").await;
        let morning = block(&db, station.id, None, tod(9, 0), tod(10, 0)).await;

        let found = scheduled_blocks::Entity::between(tod(9, 0), tod(11, 0))
            .all(&db)
            .await
            .unwrap();
        assert!(found.is_empty());
        let found = scheduled_blocks::Entity::between(tod(8, 0), tod(10, 0))
            .all(&db)
            .await
            .unwrap();
        assert!(found.is_empty());
        let found = scheduled_blocks::Entity::between(tod(8, 59), tod(10, 1))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(found, vec![morning.clone()]);

        let after = scheduled_blocks::Entity::after(tod(9, 0)).all(&db).await.unwrap();
        assert_eq!(after, vec![morning.clone()]);
        let before = scheduled_blocks::Entity::before(tod(10, 0)).all(&db).await.unwrap();
        assert_eq!(before, vec![morning]);
    }

    #[tokio::test]
    async fn current_block_follows_recurrence() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Hoima").await;
        let mondays = block(&db, station.id, Some("FREQ=WEEKLY;BYDAY=MO"), tod(9, 0), tod(12, 0)).await;
        let daily = block(&db, station.id, None, tod(6, 0), tod(18, 0)).await;

        // 2024-01-01 is a Monday; the later-starting Monday block wins there.
        let monday = current_block(&db, station.id, jan1(9, 30)).await.unwrap();
        assert_eq!(monday, Some(mondays));

        let tuesday = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
        let found = current_block(&db, station.id, tuesday).await.unwrap();
        assert_eq!(found, Some(daily));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_insert() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Masaka").await;
        let program = insert_program(&db, "Late").await;

        let base = NewScheduledBlock {
            station_id: station.id,
            name: "Evening".into(),
            recurrence: None,
            start_time: tod(18, 0),
            end_time: tod(20, 0),
        };

        let err = add_scheduled_block(&db, NewScheduledBlock { end_time: tod(18, 0), ..base.clone() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyWindow { .. })));

        let err = add_scheduled_block(&db, NewScheduledBlock { name: "  ".into(), ..base.clone() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Blank { field: "name" })));

        let err = add_scheduled_block(
            &db,
            NewScheduledBlock {
                recurrence: Some("FREQ=HOURLY".into()),
                ..base.clone()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Recurrence(_))));

        let err = add_scheduled_program(
            &db,
            NewScheduledProgram {
                station_id: station.id,
                program_id: program.id,
                start: jan1(10, 0),
                end: jan1(9, 0),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyWindow { .. })));

        let blocks = scheduled_blocks::Entity::find().all(&db).await.unwrap();
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn unknown_station_is_an_integrity_violation() {
        let db = setup_db().await;
        let program = insert_program(&db, "Orphan").await;

        let err = add_scheduled_program(
            &db,
            NewScheduledProgram {
                station_id: Uuid::new_v4(),
                program_id: program.id,
                start: jan1(9, 0),
                end: jan1(10, 0),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation(_)));
    }
}
