//! Server: loads settings, opens the MySQL pool, mounts the routes, closes the pool on shutdown.

use hardware_inventory::{build_router, AppState, MySqlSessionSource, SchemaRegistry, SessionManager, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hardware_inventory=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let source = MySqlSessionSource::connect(&settings.database).await?;
    let sessions = SessionManager::new(Arc::new(source), settings.database.timeouts());
    let state = AppState {
        sessions: sessions.clone(),
        schemas: Arc::new(SchemaRegistry::hardware()?),
    };

    let app = build_router(state, settings.body_limit);
    let listener = TcpListener::bind(settings.http_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sessions.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
