use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use employee_api::config::config;
use employee_api::database::{DatabaseManager, PgEmployeeStore};
use employee_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "employee-api", version, about = "Employee records HTTP API")]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Postgres connection URL (overrides DATABASE_URL and DB_*)")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL / DB_* / PORT can live in a file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = config().clone();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }
    config.validate()?;
    info!("Starting Employee API in {:?} mode", config.environment);

    // The pool lives for the whole process and is closed after the server stops
    let pool = DatabaseManager::connect(&config.database)?;
    let store = PgEmployeeStore::new(pool.clone(), &config.database.table);
    let state = AppState::new(Arc::new(store), config.api.expose_error_details);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Server is running on port {}", config.api.port);

    axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close(&pool).await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
