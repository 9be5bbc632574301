use radio_backend::{logging, seed};
use sea_orm::Database;
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init(&env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    let db_url = env::var("EXPORT_DB_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| "EXPORT_DB_URL or DATABASE_URL must be set")?;
    let db = Database::connect(db_url).await?;

    let seed_data = seed::export(&db).await?;

    let output_path = resolve_output_path();
    let payload = serde_json::to_string_pretty(&seed_data)?;
    fs::write(&output_path, payload)?;
    tracing::info!("Seed exported to {}", output_path);

    Ok(())
}

fn resolve_output_path() -> String {
    if let Ok(path) = env::var("SEED_OUTPUT_PATH") {
        return path;
    }

    let primary = "backend/seed_data.json";
    if fs::metadata(primary).is_ok() {
        return primary.to_string();
    }

    "seed_data.json".to_string()
}
