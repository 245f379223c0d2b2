//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! A location string is either a filesystem path ([`file_source`]) or an
//! `http://` / `https://` URL ([`http_source`]). [`parse_document`] picks
//! the deserializer from the extension; JSON is always available, YAML and
//! TOML are gated by feature flags.

pub mod file_source;
pub mod http_source;

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use url::Url;

use super::model::Document;
use super::ConfigSource;
use crate::error::ProxyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Remote(Url),
}

impl Location {
    pub fn parse(raw: &str) -> Result<Self, ProxyError> {
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(raw).map_err(|e| ProxyError::UriParse {
                source: Box::new(e),
            })?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::File(PathBuf::from(raw)))
        }
    }
}

pub fn from_location(raw: &str) -> Result<Box<dyn ConfigSource>, ProxyError> {
    match Location::parse(raw)? {
        Location::File(path) => Ok(Box::new(file_source::FileSource::new(path))),
        Location::Remote(url) => Ok(Box::new(http_source::HttpSource::new(url))),
    }
}

/// Parse a document string based on its extension. No extension means JSON.
pub fn parse_document(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Document, ProxyError> {
    match ext.to_ascii_lowercase().as_str() {
        "json" | "" => serde_json::from_str(content).map_err(|e| ProxyError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| ProxyError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| ProxyError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(ProxyError::UnsupportedFormat(other.to_string())),
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
