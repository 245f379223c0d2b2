//! `mcp-proxy run`: load the configuration and start the listener.
//!
//! Any load or validation failure aborts here, before a socket is bound.
//! The resolved configuration is then frozen into [`AppState`] and served
//! until SIGTERM / Ctrl+C.

use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config;
use crate::error::ProxyError;
use crate::logging;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), ProxyError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let loaded = config::load(&args.config).await?;
    let addr = server::listen_addr(&loaded.config.proxy.addr)?;
    let state = Arc::new(AppState::new(loaded));

    for (name, backend) in &state.config.backends {
        tracing::info!(
            server = %name,
            transport = %backend.transport.kind(),
            auth = backend.options.requires_auth(),
            log_enabled = backend.options.logs_enabled(),
            panic_if_invalid = backend.options.panics_if_invalid(),
            "server configured"
        );
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        name = %state.config.proxy.name,
        servers = state.config.backends.len(),
        config = %state.location,
        config_version = state.version.short(),
        "mcp-proxy started"
    );

    let router = server::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("mcp-proxy stopped");
    Ok(())
}
