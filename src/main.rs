use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use medrec_api::{
    config::config, database::DatabaseManager, is_development, services::UploadDir, state::AppState,
};

#[derive(Parser)]
#[command(name = "medrec-api")]
#[command(about = "Medical records API - exams, surgeries and hospitalizations")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides MEDREC_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Directory for uploaded exam files (overrides UPLOADS_DIR)")]
    uploads_dir: Option<PathBuf>,

    #[arg(long, help = "Use the in-memory store regardless of DATABASE_BACKEND")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config();

    let default_filter = if config.api.enable_request_logging {
        "info,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let args = Args::parse();
    tracing::info!("Starting medrec-api in {:?} mode", config.environment);
    if is_development!() {
        tracing::warn!("Development mode: default JWT secret and permissive CORS are in effect");
    }
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    let store = DatabaseManager::connect(&config.database, args.memory)
        .await
        .context("failed to open record store")?;

    let uploads = UploadDir::new(args.uploads_dir.unwrap_or_else(|| config.api.uploads_dir.clone()));
    uploads.ensure().await.context("failed to prepare uploads directory")?;

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("medrec-api listening on http://{}", bind_addr);

    axum::serve(listener, medrec_api::app(AppState::new(store, uploads)))
        .await
        .context("server error")?;

    Ok(())
}
