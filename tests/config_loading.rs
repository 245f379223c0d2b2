//! Integration tests for loading the example documents.

use std::time::Duration;

use mcp_proxy::config::transport::{TransportConfig, TransportType};
use mcp_proxy::config::{self, sources::parse_document};
use mcp_proxy::error::ProxyError;

fn load_example(name: &str) -> String {
    let path = format!("example/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[tokio::test]
async fn json_example_loads_and_resolves() {
    let loaded = config::load("example/config.json").await.unwrap();
    let config = &loaded.config;

    assert_eq!(loaded.source_name, "file");
    assert_eq!(config.proxy.name, "MCP Proxy");
    assert_eq!(config.backends.len(), 4);
    assert!(loaded.skipped.is_empty());
    assert!(loaded.warnings.is_empty());

    let github = &config.backends["github"];
    assert_eq!(github.transport.kind(), TransportType::Stdio);
    assert_eq!(
        github.options.auth_tokens,
        Some(vec!["DefaultTokens".to_string()])
    );
    assert_eq!(github.options.log_enabled, Some(true));
    assert_eq!(github.options.panic_if_invalid, Some(false));
    assert!(github.options.tool_filter.is_some());

    let fetch = &config.backends["fetch"];
    assert_eq!(
        fetch.options.auth_tokens,
        Some(vec!["SpecificTokens".to_string()])
    );
    assert_eq!(fetch.options.log_enabled, Some(false));
    assert_eq!(fetch.options.panic_if_invalid, Some(true));

    assert_eq!(config.backends["amap"].transport.kind(), TransportType::Sse);
    let TransportConfig::StreamableHttp(docs) = &config.backends["docs"].transport else {
        panic!("docs should be streamable-http");
    };
    assert_eq!(docs.timeout, Duration::from_secs(15));
}

#[tokio::test]
async fn legacy_example_migrates() {
    let loaded = config::load("example/legacy.json").await.unwrap();
    let config = &loaded.config;

    assert_eq!(config.proxy.addr, ":9090");
    assert_eq!(config.backends.len(), 3);
    assert_eq!(loaded.skipped.len(), 1);
    assert_eq!(loaded.skipped[0].name, "broken");

    assert_eq!(
        config.backends["fetch"].options.auth_tokens,
        Some(vec!["SpecificTokens".to_string(), "DefaultTokens".to_string()])
    );
    assert_eq!(
        config.backends["amap"].options.auth_tokens,
        Some(vec!["DefaultTokens".to_string()])
    );
    assert_eq!(
        config.backends["docs"].transport.kind(),
        TransportType::StreamableHttp
    );
    // flat legacy flags are not carried over and the legacy proxy has none
    assert_eq!(config.backends["fetch"].options.log_enabled, None);
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn yaml_and_json_examples_are_equivalent() {
    let yaml = config::load("example/config.yaml").await.unwrap();
    let json = config::load("example/config.json").await.unwrap();
    assert_eq!(yaml.config, json.config);
    assert_ne!(yaml.version, json.version);
}

#[tokio::test]
async fn invalid_example_reports_every_error() {
    let err = config::load("example/invalid.json").await.unwrap_err();
    let errors = err.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].message, "mcpProxy is required");
    assert_eq!(errors[1].scope, "mcpServers.no-command");
    assert_eq!(errors[2].scope, "mcpServers.nothing");
}

#[tokio::test]
async fn missing_file_is_a_load_error() {
    let err = config::load("example/does-not-exist.json").await.unwrap_err();
    assert!(matches!(err, ProxyError::ConfigFileNotFound { .. }));
}

#[tokio::test]
async fn version_is_stable_across_loads() {
    let first = config::load("example/config.json").await.unwrap();
    let second = config::load("example/config.json").await.unwrap();
    assert_eq!(first.version, second.version);
    assert_eq!(first.version.short().len(), 8);
}

#[test]
fn resolved_config_serializes_in_current_schema() {
    let content = load_example("legacy.json");
    let doc = parse_document("json", &content, "legacy.json").unwrap();
    let config = config::resolve(doc).unwrap().config;

    let value = serde_json::to_value(&config).unwrap();
    assert!(value.get("server").is_none());
    assert!(value.get("clients").is_none());
    assert_eq!(value["mcpProxy"]["baseURL"], "http://localhost:9090");
    assert_eq!(value["mcpServers"]["fetch"]["transportType"], "stdio");
    assert_eq!(value["mcpServers"]["fetch"]["command"], "uvx");
    assert_eq!(value["mcpServers"]["docs"]["transportType"], "streamable-http");
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_document("ini", "{}", "config.ini");
    assert!(matches!(result, Err(ProxyError::UnsupportedFormat(_))));
}
