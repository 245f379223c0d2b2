//! End-to-end resolution of whole documents through the public API.

use std::collections::HashMap;
use std::time::Duration;

use mcp_proxy::config::model::Config;
use mcp_proxy::config::options::Options;
use mcp_proxy::config::sources::parse_document;
use mcp_proxy::config::transport::{StdioTransport, TransportConfig};
use mcp_proxy::config::{self, resolve::Resolution};
use mcp_proxy::error::ValidationError;

fn resolve(json: &str) -> Result<Resolution, Vec<ValidationError>> {
    let doc = parse_document("json", json, "test.json").unwrap();
    config::resolve(doc)
}

fn resolved(json: &str) -> Config {
    resolve(json).unwrap().config
}

fn with_server(server: &str) -> String {
    format!(r#"{{"mcpProxy": {{"name": "p"}}, "mcpServers": {{"s": {server}}}}}"#)
}

#[test]
fn command_selects_stdio_whatever_the_declared_type() {
    for declared in ["", r#""transportType": "sse","#, r#""transportType": "streamable-http","#] {
        let config = resolved(&with_server(&format!(
            r#"{{{declared} "command": "npx", "args": ["-y", "pkg"], "env": {{"K": "V"}}, "url": "http://ignored"}}"#
        )));
        assert_eq!(
            config.backends["s"].transport,
            TransportConfig::Stdio(StdioTransport {
                command: "npx".into(),
                args: vec!["-y".into(), "pkg".into()],
                env: HashMap::from([("K".to_string(), "V".to_string())]),
            }),
            "declared: {declared:?}"
        );
    }
}

#[test]
fn declared_stdio_without_command_fails() {
    let errors = resolve(&with_server(r#"{"transportType": "stdio", "url": "http://x"}"#)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("command is required"));
}

#[test]
fn url_selects_streamable_http_only_when_declared() {
    let config = resolved(&with_server(
        r#"{"transportType": "streamable-http", "url": "http://x/mcp", "headers": {"A": "b"}, "timeout": 5000000000}"#,
    ));
    let TransportConfig::StreamableHttp(http) = &config.backends["s"].transport else {
        panic!("expected streamable-http");
    };
    assert_eq!(http.url, "http://x/mcp");
    assert_eq!(http.headers["A"], "b");
    assert_eq!(http.timeout, Duration::from_secs(5));

    for declared in ["", r#""transportType": "sse","#, r#""transportType": "websocket","#] {
        let config = resolved(&with_server(&format!(r#"{{{declared} "url": "http://x/sse"}}"#)));
        let TransportConfig::Sse(sse) = &config.backends["s"].transport else {
            panic!("expected sse for {declared:?}");
        };
        assert_eq!(sse.url, "http://x/sse");
    }
}

#[test]
fn neither_command_nor_url_fails() {
    let errors = resolve(&with_server(r#"{"transportType": "sse"}"#)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "invalid server type");
    assert_eq!(errors[0].scope, "mcpServers.s");
}

#[test]
fn resolving_current_output_again_changes_nothing() {
    let content = std::fs::read_to_string("example/config.json").unwrap();
    let first = config::resolve(parse_document("json", &content, "config.json").unwrap())
        .unwrap()
        .config;

    let rendered = serde_json::to_string(&first).unwrap();
    let second = resolved(&rendered);
    assert_eq!(first, second);
}

#[test]
fn unset_backend_options_inherit_proxy_options() {
    let config = resolved(
        r#"{
            "mcpProxy": {"name": "p", "options": {"authTokens": ["A"], "panicIfInvalid": true}},
            "mcpServers": {"s": {"command": "x", "options": {}}}
        }"#,
    );
    assert_eq!(
        config.backends["s"].options,
        Options {
            panic_if_invalid: Some(true),
            log_enabled: None,
            auth_tokens: Some(vec!["A".into()]),
            tool_filter: None,
        }
    );
}

#[test]
fn explicit_empty_tokens_are_not_replaced() {
    let config = resolved(
        r#"{
            "mcpProxy": {"name": "p", "options": {"authTokens": ["A"], "toolFilter": {"mode": "allow", "list": ["t"]}}},
            "mcpServers": {"s": {"command": "x", "options": {"authTokens": []}}}
        }"#,
    );
    let options = &config.backends["s"].options;
    assert_eq!(options.auth_tokens, Some(vec![]));
    assert!(!options.requires_auth());
    assert!(options.tool_filter.is_none());
}

#[test]
fn legacy_tokens_aggregate_with_global_tokens() {
    let config = resolved(
        r#"{
            "server": {"name": "old", "globalAuthTokens": ["g"]},
            "clients": {"c": {"type": "sse", "config": {"url": "http://c"}, "authTokens": ["b"]}}
        }"#,
    );
    assert_eq!(
        config.backends["c"].options.auth_tokens,
        Some(vec!["b".to_string(), "g".to_string()])
    );
}

#[test]
fn one_current_server_blocks_all_legacy_clients() {
    let config = resolved(
        r#"{
            "server": {"name": "old"},
            "clients": {
                "l1": {"type": "stdio", "config": {"command": "a"}},
                "l2": {"type": "sse", "config": {"url": "http://b"}},
                "l3": {"type": "streamable-http", "config": {"url": "http://c"}}
            },
            "mcpServers": {"current": {"command": "x"}}
        }"#,
    );
    assert_eq!(config.backends.len(), 1);
    assert!(config.backend("current").is_some());
    assert_eq!(config.proxy.name, "old");
}

#[test]
fn document_without_any_proxy_fails() {
    let errors = resolve(r#"{"clients": {"c": {"type": "sse", "config": {"url": "http://c"}}}}"#)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "mcpProxy is required");
}

#[test]
fn minimal_current_document_resolves() {
    let resolution = resolve(
        r#"{"mcpProxy": {"baseURL":"http://x","addr":":8080","name":"p","version":"1"}, "mcpServers": {"a": {"command":"run.sh"}}}"#,
    )
    .unwrap();
    let config = resolution.config;

    assert!(resolution.skipped.is_empty());
    assert_eq!(config.proxy.base_url, "http://x");
    assert_eq!(config.proxy.addr, ":8080");
    assert_eq!(config.proxy.name, "p");
    assert_eq!(config.proxy.version, "1");
    assert_eq!(config.backends.len(), 1);
    assert_eq!(
        config.backends["a"].transport,
        TransportConfig::Stdio(StdioTransport {
            command: "run.sh".into(),
            args: Vec::new(),
            env: HashMap::new(),
        })
    );
    assert_eq!(config.backends["a"].options, Options::default());
    assert_eq!(config.backends["a"].options, config.proxy.options);
}

#[test]
fn null_legacy_fields_skip_only_that_client() {
    let resolution = resolve(
        r#"{
            "server": {"name": "old", "addr": null, "globalAuthTokens": null},
            "clients": {
                "good": {"type": "sse", "config": {"url": "http://g"}, "logEnabled": null},
                "odd": {"type": null, "config": {}, "panicIfInvalid": null}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(resolution.config.proxy.addr, "");
    assert_eq!(resolution.config.backends.len(), 1);
    assert!(resolution.config.backend("good").is_some());
    assert_eq!(resolution.skipped.len(), 1);
    assert_eq!(resolution.skipped[0].name, "odd");
}
