//! Station health and telephony activity derived from stored rows.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{calls, messages, station_analytics, stations};
use crate::error::{Error, Result, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    On,
    Off,
    /// The station has never reported.
    Unknown,
}

/// A station is `On` while its latest report is no older than `heartbeat`.
pub async fn status<C>(
    db: &C,
    station_id: Uuid,
    now: DateTime<Utc>,
    heartbeat: std::time::Duration,
) -> Result<StationStatus>
where
    C: ConnectionTrait,
{
    let latest = station_analytics::Entity::find()
        .filter(station_analytics::Column::StationId.eq(station_id))
        .order_by_desc(station_analytics::Column::CreatedTime)
        .one(db)
        .await?;

    let status = match latest {
        None => StationStatus::Unknown,
        // A report stamped after `now` fails `to_std` and counts as fresh.
        Some(row) => match (now - row.created_time).to_std() {
            Ok(age) if age > heartbeat => StationStatus::Off,
            _ => StationStatus::On,
        },
    };
    debug!(%station_id, ?status, "station status");
    Ok(status)
}

/// Values reported by a station, before they are stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticReading {
    pub battery_level: Option<f64>,
    pub cpu_load: Option<f64>,
    pub memory_utilization: Option<f64>,
    pub storage_usage: Option<f64>,
    pub gsm_connectivity: Option<f64>,
    pub headphone_plug: Option<bool>,
}

impl AnalyticReading {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check("battery_level", self.battery_level, 0.0, 100.0)?;
        check("cpu_load", self.cpu_load, 0.0, f64::MAX)?;
        check("memory_utilization", self.memory_utilization, 0.0, 100.0)?;
        check("storage_usage", self.storage_usage, 0.0, 100.0)?;
        check("gsm_connectivity", self.gsm_connectivity, f64::MIN, f64::MAX)?;
        Ok(())
    }
}

fn check(
    field: &'static str,
    value: Option<f64>,
    min: f64,
    max: f64,
) -> std::result::Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

pub async fn record_analytic<C>(
    db: &C,
    station_id: Uuid,
    reading: AnalyticReading,
) -> Result<station_analytics::Model>
where
    C: ConnectionTrait,
{
    reading.validate()?;

    let row = station_analytics::ActiveModel {
        id: Set(Uuid::new_v4()),
        station_id: Set(station_id),
        battery_level: Set(reading.battery_level),
        cpu_load: Set(reading.cpu_load),
        memory_utilization: Set(reading.memory_utilization),
        storage_usage: Set(reading.storage_usage),
        gsm_connectivity: Set(reading.gsm_connectivity),
        headphone_plug: Set(reading.headphone_plug),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(%station_id, analytic_id = %row.id, "analytic recorded");
    Ok(row)
}

/// Reports in `(now - window, now]`, oldest first.
pub async fn recent_analytics<C>(
    db: &C,
    station_id: Uuid,
    now: DateTime<Utc>,
    window: chrono::Duration,
) -> Result<Vec<station_analytics::Model>>
where
    C: ConnectionTrait,
{
    let mut query = station_analytics::Entity::find()
        .filter(station_analytics::Column::StationId.eq(station_id));
    // A window reaching past the representable range covers all history.
    if let Some(since) = now.checked_sub_signed(window) {
        query = query.filter(station_analytics::Column::CreatedTime.gt(since));
    }
    let rows = query
        .filter(station_analytics::Column::CreatedTime.lte(now))
        .order_by_asc(station_analytics::Column::CreatedTime)
        .order_by_asc(station_analytics::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Column-wise view of a run of reports, one series per metric.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticSeries {
    pub created_time: Vec<DateTime<Utc>>,
    pub battery_level: Vec<Option<f64>>,
    pub cpu_load: Vec<Option<f64>>,
    pub memory_utilization: Vec<Option<f64>>,
    pub storage_usage: Vec<Option<f64>>,
    pub gsm_connectivity: Vec<Option<f64>>,
    pub headphone_plug: Vec<Option<bool>>,
}

impl AnalyticSeries {
    pub fn from_rows(rows: &[station_analytics::Model]) -> Self {
        let mut series = AnalyticSeries::default();
        for row in rows {
            series.created_time.push(row.created_time);
            series.battery_level.push(row.battery_level);
            series.cpu_load.push(row.cpu_load);
            series.memory_utilization.push(row.memory_utilization);
            series.storage_usage.push(row.storage_usage);
            series.gsm_connectivity.push(row.gsm_connectivity);
            series.headphone_plug.push(row.headphone_plug);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.created_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created_time.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelephonyDay {
    pub date: NaiveDate,
    pub calls: u64,
    pub messages: u64,
}

/// Longest history `recent_telephony` will report on.
pub const MAX_TELEPHONY_DAYS: u32 = 366;

/// Calls and messages touching the station's numbers for each of the last
/// `days` UTC dates up to and including `now`'s. Days without traffic are
/// reported as zero.
pub async fn recent_telephony<C>(
    db: &C,
    station_id: Uuid,
    now: DateTime<Utc>,
    days: u32,
) -> Result<Vec<TelephonyDay>>
where
    C: ConnectionTrait,
{
    if days > MAX_TELEPHONY_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "days",
            value: f64::from(days),
            min: 0.0,
            max: f64::from(MAX_TELEPHONY_DAYS),
        }
        .into());
    }
    let station = stations::Entity::find_by_id(station_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "station",
            id: station_id,
        })?;
    if days == 0 {
        return Ok(Vec::new());
    }

    let last = now.date_naive();
    let first = last
        .checked_sub_signed(chrono::Duration::days(i64::from(days) - 1))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "days",
            value: f64::from(days),
            min: 0.0,
            max: f64::from(MAX_TELEPHONY_DAYS),
        })?;
    let mut counts: BTreeMap<NaiveDate, (u64, u64)> = first
        .iter_days()
        .take(days as usize)
        .map(|date| (date, (0, 0)))
        .collect();

    let phones = station.phone_ids();
    if !phones.is_empty() {
        let since = Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN));

        let call_rows = calls::Entity::find()
            .filter(
                Condition::any()
                    .add(calls::Column::FromPhoneNumberId.is_in(phones.clone()))
                    .add(calls::Column::ToPhoneNumberId.is_in(phones.clone())),
            )
            .filter(calls::Column::StartTime.gte(since))
            .filter(calls::Column::StartTime.lte(now))
            .all(db)
            .await?;
        for call in call_rows {
            if let Some(entry) = call
                .start_time
                .and_then(|t| counts.get_mut(&t.date_naive()))
            {
                entry.0 += 1;
            }
        }

        let message_rows = messages::Entity::find()
            .filter(
                Condition::any()
                    .add(messages::Column::FromPhoneNumberId.is_in(phones.clone()))
                    .add(messages::Column::ToPhoneNumberId.is_in(phones)),
            )
            .filter(messages::Column::SendTime.gte(since))
            .filter(messages::Column::SendTime.lte(now))
            .all(db)
            .await?;
        for message in message_rows {
            if let Some(entry) = message
                .send_time
                .and_then(|t| counts.get_mut(&t.date_naive()))
            {
                entry.1 += 1;
            }
        }
    }

    Ok(counts
        .into_iter()
        .map(|(date, (calls, messages))| TelephonyDay {
            date,
            calls,
            messages,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_phone, insert_station, setup_db};
    use sea_orm::DatabaseConnection;
    use std::time::Duration;

    fn noon(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    async fn report_at(db: &DatabaseConnection, station_id: Uuid, at: DateTime<Utc>, battery: f64) {
        station_analytics::ActiveModel {
            id: Set(Uuid::new_v4()),
            station_id: Set(station_id),
            created_time: Set(at),
            battery_level: Set(Some(battery)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[test]
    fn reading_bounds() {
        let ok = AnalyticReading {
            battery_level: Some(100.0),
            cpu_load: Some(1.7),
            gsm_connectivity: Some(-85.0),
            ..Default::default()
        };
        assert_eq!(ok.validate(), Ok(()));

        let low_battery = AnalyticReading {
            battery_level: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            low_battery.validate(),
            Err(ValidationError::OutOfRange { field: "battery_level", .. })
        ));

        let storage = AnalyticReading {
            storage_usage: Some(100.5),
            ..Default::default()
        };
        assert!(matches!(
            storage.validate(),
            Err(ValidationError::OutOfRange { field: "storage_usage", .. })
        ));

        let nan = AnalyticReading {
            cpu_load: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(
            nan.validate(),
            Err(ValidationError::NotANumber { field: "cpu_load" })
        );
    }

    #[tokio::test]
    async fn status_follows_latest_report() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Tororo").await;
        let heartbeat = Duration::from_secs(15 * 60);
        let now = noon(10);

        assert_eq!(
            status(&db, station.id, now, heartbeat).await.unwrap(),
            StationStatus::Unknown
        );

        report_at(&db, station.id, now - chrono::Duration::hours(2), 80.0).await;
        assert_eq!(
            status(&db, station.id, now, heartbeat).await.unwrap(),
            StationStatus::Off
        );

        report_at(&db, station.id, now - chrono::Duration::minutes(5), 79.0).await;
        assert_eq!(
            status(&db, station.id, now, heartbeat).await.unwrap(),
            StationStatus::On
        );
    }

    #[tokio::test]
    async fn recorded_reading_is_validated_and_stamped() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Kabale").await;

        let err = record_analytic(
            &db,
            station.id,
            AnalyticReading {
                memory_utilization: Some(140.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let before = Utc::now();
        let row = record_analytic(
            &db,
            station.id,
            AnalyticReading {
                battery_level: Some(55.0),
                headphone_plug: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(row.created_time >= before - chrono::Duration::seconds(1));
        assert_eq!(row.battery_level, Some(55.0));
    }

    #[tokio::test]
    async fn recent_analytics_window() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Kasese").await;
        let now = noon(15);

        report_at(&db, station.id, now - chrono::Duration::days(14), 10.0).await;
        report_at(&db, station.id, now - chrono::Duration::days(3), 30.0).await;
        report_at(&db, station.id, now - chrono::Duration::days(7), 20.0).await;
        report_at(&db, station.id, now + chrono::Duration::hours(1), 40.0).await;

        let rows = recent_analytics(&db, station.id, now, chrono::Duration::days(14))
            .await
            .unwrap();
        let series = AnalyticSeries::from_rows(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series.battery_level, vec![Some(20.0), Some(30.0)]);
        assert_eq!(series.headphone_plug, vec![None, None]);
    }

    #[tokio::test]
    async fn telephony_counts_are_zero_filled() {
        let db = setup_db().await;
        let cloud = insert_phone(&db, "700000001").await;
        let listener = insert_phone(&db, "772000002").await;
        let mut station: stations::ActiveModel = insert_station(&db, "Radio Moroto").await.into();
        station.cloud_phone_id = Set(Some(cloud.id));
        let station = station.update(&db).await.unwrap();

        let call = |from: Uuid, to: Uuid, at: DateTime<Utc>| calls::ActiveModel {
            id: Set(Uuid::new_v4()),
            start_time: Set(Some(at)),
            end_time: Set(Some(at + chrono::Duration::minutes(3))),
            from_phone_number_id: Set(Some(from)),
            to_phone_number_id: Set(Some(to)),
            ..Default::default()
        };
        call(listener.id, cloud.id, noon(9)).insert(&db).await.unwrap();
        call(listener.id, cloud.id, noon(9)).insert(&db).await.unwrap();
        call(cloud.id, listener.id, noon(7)).insert(&db).await.unwrap();
        // Outside the window.
        call(listener.id, cloud.id, noon(1)).insert(&db).await.unwrap();

        messages::ActiveModel {
            id: Set(Uuid::new_v4()),
            send_time: Set(Some(noon(10) - chrono::Duration::hours(1))),
            text: Set(Some("request: track 4".into())),
            from_phone_number_id: Set(Some(listener.id)),
            to_phone_number_id: Set(Some(cloud.id)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let days = recent_telephony(&db, station.id, noon(10), 4).await.unwrap();
        let got: Vec<(u32, u64, u64)> = days
            .iter()
            .map(|d| (chrono::Datelike::day(&d.date), d.calls, d.messages))
            .collect();
        assert_eq!(got, vec![(7, 1, 0), (8, 0, 0), (9, 2, 0), (10, 0, 1)]);
    }

    #[tokio::test]
    async fn telephony_history_is_capped() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Nebbi").await;

        for days in [MAX_TELEPHONY_DAYS + 1, u32::MAX] {
            let err = recent_telephony(&db, station.id, noon(10), days)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::OutOfRange { field: "days", .. })
            ));
        }

        let year = recent_telephony(&db, station.id, noon(10), MAX_TELEPHONY_DAYS)
            .await
            .unwrap();
        assert_eq!(year.len(), MAX_TELEPHONY_DAYS as usize);
        assert_eq!(year.last().map(|d| d.date), Some(noon(10).date_naive()));
    }

    #[tokio::test]
    async fn oversized_analytics_window_covers_all_history() {
        let db = setup_db().await;
        let station = insert_station(&db, "Radio Pader").await;
        let now = noon(15);
        report_at(&db, station.id, now - chrono::Duration::days(400), 50.0).await;

        let rows = recent_analytics(&db, station.id, now, chrono::Duration::MAX)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn telephony_for_unknown_station() {
        let db = setup_db().await;
        let err = recent_telephony(&db, Uuid::new_v4(), noon(10), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "station", .. }));
    }
}
