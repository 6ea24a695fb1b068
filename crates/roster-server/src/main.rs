//! Pickup Roster Server
//!
//! Lets people sign up for today's game and shows who is playing. Sign-ups
//! are kept for the current local day only; a background task clears the
//! previous day's roster at every local midnight.
//!
//! Uses SQLite (embedded) for storage.

mod config;
mod handlers;
mod services;
mod storage;
mod views;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use roster_core::{AttendanceStore, Clock, MemoryStore, ResetScheduler, SystemClock};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, StorageKind};
use services::RosterService;
use storage::Database;

const DEFAULT_LOG_FILTER: &str = "roster_server=info,roster_core=info,tower_http=info";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterService>,
    pub base_path: Arc<str>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Pickup Roster Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, storage={:?}, db={}, base_path={}",
        config.bind_address, config.storage, config.database_path, config.base_path
    );

    // Open storage; any failure here aborts startup
    let mut database = None;
    let store: Arc<dyn AttendanceStore> = match config.storage {
        StorageKind::Sqlite => {
            let db = Arc::new(
                Database::new(&config.database_path)
                    .await
                    .context("Failed to initialize database")?,
            );
            database = Some(db.clone());
            db
        }
        StorageKind::Memory => {
            warn!("Using in-memory storage, sign-ups will not survive a restart");
            let memory = Arc::new(MemoryStore::new());
            memory
                .ensure_schema()
                .await
                .context("Failed to initialize in-memory storage")?;
            memory
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let shutdown = CancellationToken::new();

    let scheduler = ResetScheduler::new(store.clone(), clock.clone()).spawn(shutdown.clone());

    let state = AppState {
        roster: Arc::new(RosterService::new(store, clock)),
        base_path: config.base_path.as_str().into(),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Server is running on http://{}", config.bind_address);

    tokio::spawn(shutdown_signal(shutdown.clone()));

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .await
        .context("Server error")?;

    shutdown.cancel();
    if let Err(e) = scheduler.await {
        warn!("Reset scheduler ended abnormally: {}", e);
    }
    if let Some(db) = database {
        db.close().await;
    }

    info!("Server stopped");
    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/submit", post(handlers::pages::submit))
        .route("/players", get(handlers::pages::players))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Cancel `token` on ctrl-c or SIGTERM.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
    token.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let state = AppState {
            roster: Arc::new(RosterService::new(
                Arc::new(MemoryStore::new()),
                Arc::new(SystemClock),
            )),
            base_path: "/".into(),
        };

        let response = app(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
