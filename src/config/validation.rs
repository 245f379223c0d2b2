//! Configuration validation with detailed error reporting.
//!
//! Fatal checks run while the document is resolved: a missing proxy section
//! and any current-schema backend that does not resolve to a transport.
//! [`warnings`] reports suspicious but loadable settings, and
//! [`format_validation_report`] renders a summary of a resolved [`Config`].

use url::Url;

use super::model::{Config, ServerRecord};
use super::options::ToolFilter;
use super::transport::{TransportConfig, TransportError};
use crate::error::ValidationError;

#[must_use]
pub fn missing_proxy() -> ValidationError {
    ValidationError::root("mcpProxy", "mcpProxy is required")
        .with_suggestion("add an 'mcpProxy' section with baseURL, addr, name and version")
}

/// Describe why a current-schema backend record has no usable transport.
#[must_use]
pub fn transport_error(name: &str, record: &ServerRecord, err: &TransportError) -> ValidationError {
    match err {
        TransportError::CommandRequired => {
            let error = ValidationError::server(name, "command", err.to_string());
            if record.url.is_empty() {
                error
            } else {
                error.with_suggestion(
                    "remove transportType or set it to 'sse' or 'streamable-http' to use the url",
                )
            }
        }
        TransportError::InvalidServerType => ValidationError::server(name, "transportType", err.to_string())
            .with_suggestion("set 'command' for a stdio server or 'url' for an HTTP server"),
        other => ValidationError::server(name, "transportType", other.to_string()),
    }
}

/// Validate a backend URL. Returns `Ok(())` or a human-readable error.
pub fn validate_backend_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme == "http" || scheme == "https" {
                Ok(())
            } else {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

fn tool_filter_warning(name: &str, filter: &ToolFilter) -> Option<ValidationError> {
    if filter.mode.is_none() && !filter.list.is_empty() {
        return Some(
            ValidationError::server(name, "options.toolFilter.mode", "mode is not set, list is ignored")
                .with_suggestion("set mode to 'allow' or 'block'"),
        );
    }
    None
}

/// Non-fatal findings on a resolved configuration.
#[must_use]
pub fn warnings(config: &Config) -> Vec<ValidationError> {
    let mut found = Vec::new();

    if !config.proxy.base_url.is_empty() {
        if let Err(msg) = validate_backend_url(&config.proxy.base_url) {
            found.push(ValidationError::root("mcpProxy.baseURL", msg));
        }
    }

    for (name, backend) in &config.backends {
        match &backend.transport {
            TransportConfig::Sse(t) => {
                if let Err(msg) = validate_backend_url(&t.url) {
                    found.push(ValidationError::server(name, "url", msg));
                }
            }
            TransportConfig::StreamableHttp(t) => {
                if let Err(msg) = validate_backend_url(&t.url) {
                    found.push(ValidationError::server(name, "url", msg));
                }
            }
            TransportConfig::Stdio(_) => {}
        }

        if let Some(warning) = backend
            .options
            .tool_filter
            .as_ref()
            .and_then(|f| tool_filter_warning(name, f))
        {
            found.push(warning);
        }
    }

    found
}

#[must_use]
pub fn format_validation_report(location: &str, config: &Config) -> String {
    let proxy = &config.proxy;
    let kinds = config
        .transport_counts()
        .iter()
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![format!(
        "  proxy '{}' v{} on {} ({})",
        proxy.name,
        proxy.version,
        if proxy.addr.is_empty() { "(no addr)" } else { proxy.addr.as_str() },
        if proxy.base_url.is_empty() { "(no baseURL)" } else { proxy.base_url.as_str() },
    )];
    lines.push(format!(
        "  {} servers{}\n",
        config.backends.len(),
        if kinds.is_empty() { String::new() } else { format!(" ({kinds})") }
    ));

    for (name, backend) in &config.backends {
        let options = &backend.options;
        lines.push(format!(
            "  {name}  -> {} {}",
            backend.transport.kind(),
            backend.transport.endpoint()
        ));
        let auth = match options.auth_tokens.as_deref() {
            None | Some([]) => "none".to_string(),
            Some(tokens) => format!("{} tokens", tokens.len()),
        };
        lines.push(format!("    auth: {auth}"));
        lines.push(format!(
            "    logEnabled: {}, panicIfInvalid: {}",
            options.logs_enabled(),
            options.panics_if_invalid()
        ));
        if let Some(filter) = &options.tool_filter {
            let mode = match filter.mode {
                Some(mode) => format!("{mode:?}").to_lowercase(),
                None => "unset".into(),
            };
            lines.push(format!("    toolFilter: {mode} [{}]", filter.list.join(", ")));
        }
    }

    format!("{location} is valid\n{}", lines.join("\n"))
}
