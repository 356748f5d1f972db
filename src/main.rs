use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commonplace_api::config;
use commonplace_api::database::DatabaseManager;
use commonplace_api::{app, AppState};

#[derive(Parser)]
#[command(name = "commonplace-api")]
#[command(about = "Commonplace API - note-taking backend for entries and topics")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Database URL (overrides DATABASE_URL)")]
    database_url: Option<String>,

    #[arg(long, help = "Skip applying migrations at startup")]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commonplace_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = config::config().clone();
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    tracing::info!("Starting Commonplace API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("SECURITY_JWT_SECRET must be set in {:?} mode", config.environment);
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    if !cli.no_migrate {
        DatabaseManager::migrate(&pool).await.context("failed to apply migrations")?;
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Commonplace API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(pool.clone(), config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
