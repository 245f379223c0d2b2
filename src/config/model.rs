//! Serde data structures for the proxy configuration document.
//!
//! [`Document`] is the superset read from disk or over HTTP: it carries the
//! deprecated `server` / `clients` sections next to the current `mcpProxy` /
//! `mcpServers` ones. [`Config`] is the canonical, fully resolved result
//! handed to the listener. Unknown fields are ignored so documents written
//! for newer releases still load.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use super::legacy::{LegacyClientRecord, LegacyProxyRecord};
use super::options::Options;
use super::transport::{
    SseTransport, StdioTransport, StreamableHttpTransport, TransportConfig, TransportError,
    TransportType,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Deprecated: replaced by `mcpProxy`.
    #[serde(default, rename = "server")]
    pub legacy_proxy: Option<LegacyProxyRecord>,

    /// Deprecated: replaced by `mcpServers`.
    #[serde(default, deserialize_with = "null_as_default", rename = "clients")]
    pub legacy_clients: BTreeMap<String, LegacyClientRecord>,

    #[serde(default, rename = "mcpProxy")]
    pub proxy: Option<ProxyRecord>,

    #[serde(default, deserialize_with = "null_as_default", rename = "mcpServers")]
    pub servers: BTreeMap<String, ServerRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRecord {
    #[serde(default, deserialize_with = "null_as_default", rename = "baseURL")]
    pub base_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub addr: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,

    #[serde(default)]
    pub options: Option<Options>,
}

/// One backend in the current schema. Fields for every transport live side
/// by side; [`ServerRecord::transport`] decides which one applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    /// Kept as a raw string: an unrecognised value behaves like an absent one.
    #[serde(default)]
    pub transport_type: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub env: HashMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,

    /// Nanoseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeout: u64,

    #[serde(default)]
    pub options: Option<Options>,
}

impl ServerRecord {
    #[must_use]
    pub fn declared_type(&self) -> Option<TransportType> {
        self.transport_type.as_deref().and_then(TransportType::parse)
    }

    /// Resolve this record to exactly one transport variant.
    ///
    /// A command (or an explicit `stdio` type) selects the stdio transport.
    /// Otherwise a URL is required and the type picks between streamable
    /// HTTP and SSE, defaulting to SSE.
    pub fn transport(&self) -> Result<TransportConfig, TransportError> {
        let declared = self.declared_type();

        if !self.command.is_empty() || declared == Some(TransportType::Stdio) {
            if self.command.is_empty() {
                return Err(TransportError::CommandRequired);
            }
            return Ok(TransportConfig::Stdio(StdioTransport {
                command: self.command.clone(),
                args: self.args.clone(),
                env: self.env.clone(),
            }));
        }

        if self.url.is_empty() {
            return Err(TransportError::InvalidServerType);
        }

        if declared == Some(TransportType::StreamableHttp) {
            Ok(TransportConfig::StreamableHttp(StreamableHttpTransport {
                url: self.url.clone(),
                headers: self.headers.clone(),
                timeout: Duration::from_nanos(self.timeout),
            }))
        } else {
            Ok(TransportConfig::Sse(SseTransport {
                url: self.url.clone(),
                headers: self.headers.clone(),
            }))
        }
    }
}

/// Treat an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(rename = "mcpProxy")]
    pub proxy: ProxyConfig,

    #[serde(rename = "mcpServers")]
    pub backends: BTreeMap<String, Backend>,
}

impl Config {
    #[must_use]
    pub fn backend(&self, name: &str) -> Option<&Backend> {
        self.backends.get(name)
    }

    /// Backend count per transport kind, in a stable order.
    #[must_use]
    pub fn transport_counts(&self) -> Vec<(TransportType, usize)> {
        [
            TransportType::Stdio,
            TransportType::Sse,
            TransportType::StreamableHttp,
        ]
        .into_iter()
        .map(|kind| {
            let count = self
                .backends
                .values()
                .filter(|b| b.transport.kind() == kind)
                .count();
            (kind, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub addr: String,
    pub name: String,
    pub version: String,
    pub options: Options,
}

impl From<ProxyRecord> for ProxyConfig {
    fn from(record: ProxyRecord) -> Self {
        Self {
            base_url: record.base_url,
            addr: record.addr,
            name: record.name,
            version: record.version,
            options: record.options.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backend {
    #[serde(flatten)]
    pub transport: TransportConfig,
    pub options: Options,
}
