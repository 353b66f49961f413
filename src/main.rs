use std::path::Path;

use fintrack_api::app_state::AppState;
use fintrack_api::config::load_config;
use fintrack_api::http;
use fintrack_api::infra::sqlite::Storage;
use fintrack_api::telemetry::init_telemetry;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if exists
    let _ = dotenvy::dotenv();

    let config = load_config().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    init_telemetry(&config.telemetry);

    tracing::info!("Initializing storage...");

    let storage = Storage::connect(&config.db).await?;
    storage.init_schema(Path::new(&config.db.schema_path)).await?;

    let app_state = AppState::new(config.service.clone(), storage);

    // Setup graceful shutdown
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = tx.send(());
        }
    });

    let server = http::start_server(config, app_state);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
                return Err(e.into());
            }
        }
        _ = rx => {
            tracing::info!("Shutting down gracefully");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
