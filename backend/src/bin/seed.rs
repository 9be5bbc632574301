use radio_backend::config::Config;
use radio_backend::seed::{self, SeedData};
use radio_backend::{db, logging};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);
    let db = db::connect(&config).await?;

    let seed_path = resolve_seed_path();
    let seed_raw = fs::read_to_string(&seed_path)
        .map_err(|e| format!("Failed to read {}: {}", seed_path, e))?;
    let seed: SeedData = serde_json::from_str(&seed_raw)
        .map_err(|e| format!("Failed to parse {}: {}", seed_path, e))?;

    seed::import(&db, seed).await?;

    tracing::info!("Seed completed successfully from {}", seed_path);
    Ok(())
}

fn resolve_seed_path() -> String {
    if let Ok(path) = env::var("SEED_DATA_PATH") {
        return path;
    }

    let primary = "backend/seed_data.json";
    if fs::metadata(primary).is_ok() {
        return primary.to_string();
    }

    "seed_data.json".to_string()
}
