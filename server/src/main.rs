use std::net::SocketAddr;

use anyhow::Context;
use events_dao::schema::ensure_schema;
use events_http::EventServices;
use sql_connection::{SqlConnect, connect_postgres_db};
use surface_tag::{app, config::ServerConfig};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!("Initializing connection pool...");
    let pool = connect_postgres_db(&config.db).await?;
    let db = SqlConnect::new(pool).with_sql_logging(config.db.logger);
    info!("PostgreSQL connection pool initialized");

    ensure_schema(&db)
        .await
        .context("failed to create events schema")?;

    let app = app(EventServices::postgres(db.clone()), Some(db));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Surface tag server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
