//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload describing the running
//! binary, the proxy record, where the configuration came from, and one
//! entry per resolved backend. Config locations, backend URLs, commands
//! and tokens are not included.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub proxy: ProxyHealth,
    pub config: ConfigHealth,
    pub servers: Vec<ServerHealth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyHealth {
    pub name: String,
    pub version: String,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub servers: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerHealth {
    pub name: String,
    pub transport: String,
    pub auth_required: bool,
    pub log_enabled: bool,
    pub panic_if_invalid: bool,
    pub tool_filter: bool,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = &state.config;

    let servers = config
        .backends
        .iter()
        .map(|(name, backend)| ServerHealth {
            name: name.clone(),
            transport: backend.transport.kind().to_string(),
            auth_required: backend.options.requires_auth(),
            log_enabled: backend.options.logs_enabled(),
            panic_if_invalid: backend.options.panics_if_invalid(),
            tool_filter: backend.options.tool_filter.is_some(),
        })
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::BUILD_VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        proxy: ProxyHealth {
            name: config.proxy.name.clone(),
            version: config.proxy.version.clone(),
            base_url: config.proxy.base_url.clone(),
        },
        config: ConfigHealth {
            source: state.source_name.clone(),
            version: state.version.short().to_string(),
            servers: config.backends.len(),
        },
        servers,
    })
}
