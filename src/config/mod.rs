//! Configuration loading, migration, and resolution.
//!
//! Defines the [`ConfigSource`] trait for fetching a raw document from a
//! file or an HTTP(S) URL, and [`load`] which runs the whole pipeline:
//! fetch, parse, migrate the legacy schema, cascade options, validate.
//! The result is immutable and is shared read-only with the listener.

pub mod legacy;
pub mod model;
pub mod options;
pub mod resolve;
pub mod sources;
pub mod transport;
pub mod validation;

use async_trait::async_trait;

use crate::error::{ProxyError, ValidationError};
use legacy::SkippedBackend;
use model::Config;

pub use resolve::resolve;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

impl ConfigVersion {
    /// First 8 characters, for logs and health output.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h),
        }
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Path or URL, for messages.
    fn location(&self) -> String;

    /// Document format hint, usually the file extension. Empty when unknown.
    fn extension(&self) -> String;

    async fn fetch(&self) -> Result<String, ProxyError>;
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub version: ConfigVersion,
    pub source_name: String,
    pub location: String,
    pub skipped: Vec<SkippedBackend>,
    pub warnings: Vec<ValidationError>,
}

/// Load and resolve the document at `location` (a path or an http(s) URL).
pub async fn load(location: &str) -> Result<LoadedConfig, ProxyError> {
    let source = sources::from_location(location)?;
    load_from(source.as_ref()).await
}

pub async fn load_from(source: &dyn ConfigSource) -> Result<LoadedConfig, ProxyError> {
    let location = source.location();
    let content = source.fetch().await?;
    let document = sources::parse_document(&source.extension(), &content, &location)?;

    let resolution =
        resolve(document).map_err(|errors| ProxyError::ConfigValidation { errors })?;

    for skipped in &resolution.skipped {
        tracing::warn!(
            server = %skipped.name,
            error = %skipped.error,
            "skipping legacy client that could not be migrated"
        );
    }

    let warnings = validation::warnings(&resolution.config);
    for warning in &warnings {
        tracing::warn!(
            scope = %warning.scope,
            field = %warning.field,
            "{}",
            warning.message
        );
    }

    let version = ConfigVersion::Hash(sources::sha256_hex(content.as_bytes()));
    tracing::debug!(
        source = source.name(),
        location = %location,
        version = version.short(),
        servers = resolution.config.backends.len(),
        "config resolved"
    );

    Ok(LoadedConfig {
        config: resolution.config,
        version,
        source_name: source.name().to_string(),
        location,
        skipped: resolution.skipped,
        warnings,
    })
}
