//! Transport variants a backend can resolve to.
//!
//! A backend is reached through exactly one [`TransportConfig`]: a spawned
//! process speaking over stdio, a long-lived SSE connection, or a
//! streamable-HTTP request stream. [`TransportType`] is the discriminator
//! used by both document schemas.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Stdio,
    Sse,
    StreamableHttp,
}

impl TransportType {
    /// Parse a discriminator string. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "stdio" => Some(Self::Stdio),
            "sse" => Some(Self::Sse),
            "streamable-http" => Some(Self::StreamableHttp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
            Self::StreamableHttp => "streamable-http",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StdioTransport {
    pub command: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SseTransport {
    pub url: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamableHttpTransport {
    pub url: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Zero means the transport's own default applies.
    #[serde(serialize_with = "serialize_nanos", skip_serializing_if = "Duration::is_zero")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transportType")]
pub enum TransportConfig {
    #[serde(rename = "stdio")]
    Stdio(StdioTransport),
    #[serde(rename = "sse")]
    Sse(SseTransport),
    #[serde(rename = "streamable-http")]
    StreamableHttp(StreamableHttpTransport),
}

impl TransportConfig {
    #[must_use]
    pub const fn kind(&self) -> TransportType {
        match self {
            Self::Stdio(_) => TransportType::Stdio,
            Self::Sse(_) => TransportType::Sse,
            Self::StreamableHttp(_) => TransportType::StreamableHttp,
        }
    }

    /// The command for stdio backends, the URL otherwise.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Stdio(t) => &t.command,
            Self::Sse(t) => &t.url,
            Self::StreamableHttp(t) => &t.url,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("command is required for stdio transport")]
    CommandRequired,

    #[error("invalid server type")]
    InvalidServerType,

    #[error("invalid client type '{0}'")]
    InvalidClientType(String),

    #[error("missing config payload for {kind} client")]
    MissingPayload { kind: TransportType },

    #[error("invalid {kind} config: {source}")]
    Payload {
        kind: TransportType,
        #[source]
        source: serde_json::Error,
    },
}

/// Documents encode durations as integer nanoseconds.
#[allow(clippy::cast_possible_truncation)]
fn serialize_nanos<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_nanos() as u64)
}
