//! Config documents fetched over HTTP(S).
//!
//! Uses a hyper client with rustls and webpki roots. Non-2xx responses,
//! timeouts and bodies over [`MAX_DOCUMENT_BYTES`] are load errors; nothing
//! is retried.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use url::Url;

use crate::config::ConfigSource;
use crate::error::ProxyError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub const MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, Full<Bytes>>;

#[must_use]
pub fn build_http_client() -> HttpClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring`.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new()).build(https)
}

pub struct HttpSource {
    url: Url,
    client: HttpClient,
}

impl HttpSource {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: build_http_client(),
        }
    }

    fn fetch_error(&self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> ProxyError {
        ProxyError::ConfigFetch {
            url: self.url.to_string(),
            source: source.into(),
        }
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn location(&self) -> String {
        self.url.to_string()
    }

    fn extension(&self) -> String {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|last| last.rsplit_once('.'))
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default()
    }

    async fn fetch(&self) -> Result<String, ProxyError> {
        let uri: hyper::Uri = self
            .url
            .as_str()
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| ProxyError::UriParse {
                source: Box::new(e),
            })?;

        let req = hyper::Request::builder()
            .uri(uri)
            .header(hyper::header::USER_AGENT, concat!("mcp-proxy/", env!("CARGO_PKG_VERSION")))
            .body(Full::new(Bytes::new()))
            .map_err(|e| self.fetch_error(e))?;

        let response = tokio::time::timeout(FETCH_TIMEOUT, self.client.request(req))
            .await
            .map_err(|_| self.fetch_error(format!("timed out after {}s", FETCH_TIMEOUT.as_secs())))?
            .map_err(|e| self.fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.fetch_error(format!("unexpected status {status}")));
        }

        let body = Limited::new(response.into_body(), MAX_DOCUMENT_BYTES)
            .collect()
            .await
            .map_err(|e| self.fetch_error(e))?
            .to_bytes();

        String::from_utf8(body.to_vec()).map_err(|e| self.fetch_error(e))
    }
}
