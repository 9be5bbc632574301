use radio_backend::config::Config;
use radio_backend::entities::{programs, stations};
use radio_backend::{db, logging, monitoring};
use sea_orm::{EntityTrait, ModelTrait, QueryOrder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);

    let db = db::connect(&config).await?;

    let stations = stations::Entity::find()
        .order_by_asc(stations::Column::Name)
        .all(&db)
        .await?;
    tracing::info!("{} stations", stations.len());

    let now = chrono::Utc::now();
    for station in stations {
        let status = station.status(&db, config.status_heartbeat).await?;

        let current = match station.current_program(&db).await? {
            Some(slot) => slot.find_related(programs::Entity).one(&db).await?.map(|p| p.name),
            None => None,
        };
        let next = station.next_program(&db).await?;
        let block = station.current_block(&db).await?;

        let analytics =
            monitoring::recent_analytics(&db, station.id, now, config.analytics_window).await?;

        tracing::info!(
            station = %station.name,
            ?status,
            current = current.as_deref().unwrap_or("-"),
            next_start = ?next.map(|slot| slot.start),
            block = block.as_ref().map(|b| b.name.as_str()).unwrap_or("-"),
            reports = analytics.len(),
            "station summary"
        );
    }

    Ok(())
}
