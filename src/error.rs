//! Unified error types for the proxy.
//!
//! Defines [`ProxyError`] (the main crate error enum) and
//! [`ValidationError`] for configuration resolution failures. Both use
//! `thiserror` or a hand-written `Display`. Messages name the failing
//! section or backend so the operator can find it in the document.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// `(root)` or `mcpServers.<name>`.
    pub scope: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    #[must_use]
    pub fn root(field: &str, message: impl Into<String>) -> Self {
        Self {
            scope: "(root)".into(),
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn server(name: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            scope: format!("mcpServers.{name}"),
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}: {}", self.scope, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Failed to fetch config from {url}: {source}")]
    ConfigFetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid listen address '{addr}'")]
    AddressParse { addr: String },

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

impl ProxyError {
    /// The collected validation errors, if this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Self::ConfigValidation { errors } => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_scope_and_field() {
        let err = ValidationError::server("files", "command", "command is required for stdio transport");
        assert_eq!(
            err.to_string(),
            "  mcpServers.files: command: command is required for stdio transport"
        );
    }

    #[test]
    fn suggestion_is_appended() {
        let err = ValidationError::root("mcpProxy", "mcpProxy is required")
            .with_suggestion("add an mcpProxy section");
        assert!(err.to_string().ends_with("(add an mcpProxy section)"));
    }

    #[test]
    fn validation_failure_lists_every_error() {
        let err = ProxyError::ConfigValidation {
            errors: vec![
                ValidationError::root("mcpProxy", "mcpProxy is required"),
                ValidationError::server("a", "transportType", "invalid server type"),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("mcpProxy is required"));
        assert!(text.contains("mcpServers.a"));
        assert_eq!(err.validation_errors().map(<[_]>::len), Some(2));
    }
}
