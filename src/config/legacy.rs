//! Migration of the deprecated flat schema.
//!
//! Older documents describe the proxy under `server` and each backend under
//! `clients`, where a backend's `config` payload is untyped and its shape is
//! implied by the sibling `type` field. Migration is best effort: a backend
//! whose payload does not decode is skipped and reported, never fatal.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::model::{null_as_default, Backend, ProxyRecord, ServerRecord};
use super::options::Options;
use super::transport::{TransportError, TransportType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProxyRecord {
    #[serde(default, deserialize_with = "null_as_default", rename = "baseURL")]
    pub base_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub addr: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,

    #[serde(default)]
    pub global_auth_tokens: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyClientRecord {
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    pub kind: String,

    /// Shape depends on `kind`.
    #[serde(default)]
    pub config: Option<serde_json::Value>,

    /// Read for completeness; not carried into the migrated options.
    #[serde(default, deserialize_with = "null_as_default")]
    pub panic_if_invalid: bool,

    /// Read for completeness; not carried into the migrated options.
    #[serde(default, deserialize_with = "null_as_default")]
    pub log_enabled: bool,

    #[serde(default)]
    pub auth_tokens: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct StdioPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    env: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    args: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SsePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    headers: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct StreamablePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    headers: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    timeout: u64,
}

impl LegacyClientRecord {
    /// Decode the untyped payload against `kind` into a current-schema record.
    pub fn to_server_record(&self) -> Result<ServerRecord, TransportError> {
        let kind = TransportType::parse(&self.kind)
            .ok_or_else(|| TransportError::InvalidClientType(self.kind.clone()))?;

        let mut record = match kind {
            TransportType::Stdio => {
                let payload: StdioPayload = self.decode(kind)?;
                ServerRecord {
                    command: payload.command,
                    args: payload.args,
                    env: payload.env,
                    ..ServerRecord::default()
                }
            }
            TransportType::Sse => {
                let payload: SsePayload = self.decode(kind)?;
                ServerRecord {
                    url: payload.url,
                    headers: payload.headers,
                    ..ServerRecord::default()
                }
            }
            TransportType::StreamableHttp => {
                let payload: StreamablePayload = self.decode(kind)?;
                ServerRecord {
                    url: payload.url,
                    headers: payload.headers,
                    timeout: payload.timeout,
                    ..ServerRecord::default()
                }
            }
        };
        record.transport_type = Some(kind.as_str().to_string());
        Ok(record)
    }

    fn decode<T: DeserializeOwned>(&self, kind: TransportType) -> Result<T, TransportError> {
        let value = self
            .config
            .clone()
            .ok_or(TransportError::MissingPayload { kind })?;
        serde_json::from_value(value).map_err(|source| TransportError::Payload { kind, source })
    }
}

/// A legacy backend left out of the migrated set.
#[derive(Debug)]
pub struct SkippedBackend {
    pub name: String,
    pub error: TransportError,
}

#[derive(Debug, Default)]
pub struct Migration {
    /// Backends before option inheritance.
    pub backends: BTreeMap<String, Backend>,
    pub skipped: Vec<SkippedBackend>,
}

#[must_use]
pub fn migrate_proxy(legacy: &LegacyProxyRecord) -> ProxyRecord {
    ProxyRecord {
        base_url: legacy.base_url.clone(),
        addr: legacy.addr.clone(),
        name: legacy.name.clone(),
        version: legacy.version.clone(),
        options: Some(Options {
            auth_tokens: legacy.global_auth_tokens.clone(),
            ..Options::default()
        }),
    }
}

/// Convert every legacy client, appending the legacy proxy's global tokens
/// after each client's own tokens.
#[must_use]
pub fn migrate_clients(
    clients: &BTreeMap<String, LegacyClientRecord>,
    legacy_proxy: Option<&LegacyProxyRecord>,
) -> Migration {
    let global_tokens = legacy_proxy
        .and_then(|p| p.global_auth_tokens.as_deref())
        .unwrap_or_default();

    let mut migration = Migration::default();
    for (name, client) in clients {
        let transport = client
            .to_server_record()
            .and_then(|record| record.transport());
        let transport = match transport {
            Ok(t) => t,
            Err(error) => {
                migration.skipped.push(SkippedBackend {
                    name: name.clone(),
                    error,
                });
                continue;
            }
        };

        let mut auth_tokens = client.auth_tokens.clone();
        if !global_tokens.is_empty() {
            auth_tokens
                .get_or_insert_with(Vec::new)
                .extend_from_slice(global_tokens);
        }

        migration.backends.insert(
            name.clone(),
            Backend {
                transport,
                options: Options {
                    auth_tokens,
                    ..Options::default()
                },
            },
        );
    }
    migration
}
