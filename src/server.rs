//! Axum listener shell, shared application state, and graceful shutdown.
//!
//! [`AppState`] holds the resolved configuration behind an `Arc`; it is
//! built once at startup and only ever read afterwards. [`build_router`]
//! mounts the health endpoint, [`listen_addr`] normalizes the proxy's
//! `addr` setting, and [`shutdown_signal`] waits for SIGTERM / Ctrl+C.

use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::model::Config;
use crate::config::{ConfigVersion, LoadedConfig};
use crate::error::ProxyError;
use crate::health::health_handler;

#[derive(Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub version: ConfigVersion,
    pub source_name: String,
    pub location: String,
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(loaded: LoadedConfig) -> Self {
        Self {
            config: Arc::new(loaded.config),
            version: loaded.version,
            source_name: loaded.source_name,
            location: loaded.location,
            start_time: Instant::now(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Turn the proxy's `addr` into something `TcpListener::bind` accepts.
/// A bare `:port` listens on every interface.
pub fn listen_addr(addr: &str) -> Result<String, ProxyError> {
    let addr = addr.trim();
    let invalid = || ProxyError::AddressParse {
        addr: addr.to_string(),
    };

    let (host, port) = addr.rsplit_once(':').ok_or_else(invalid)?;
    port.parse::<u16>().map_err(|_| invalid())?;

    if host.is_empty() {
        Ok(format!("0.0.0.0:{port}"))
    } else {
        Ok(addr.to_string())
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
