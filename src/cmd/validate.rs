//! `mcp-proxy validate`: check a configuration document for errors.
//!
//! Loads the document (file or URL), runs migration and resolution, and
//! reports the outcome as human-readable text or as JSON. The JSON form
//! includes the fully resolved configuration with auth tokens, stdio env
//! values and HTTP header values masked.

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::model::Config;
use crate::config::options::Options;
use crate::config::transport::TransportConfig;
use crate::config::{self, validation, LoadedConfig};
use crate::error::{ProxyError, ValidationError};

const REDACTED: &str = "<redacted>";

fn redact_options(options: &mut Options) {
    if let Some(tokens) = options.auth_tokens.as_mut() {
        tokens.iter_mut().for_each(|t| *t = REDACTED.to_string());
    }
}

/// Copy of `config` that is safe to print.
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    redact_options(&mut config.proxy.options);
    for backend in config.backends.values_mut() {
        redact_options(&mut backend.options);
        let values = match &mut backend.transport {
            TransportConfig::Stdio(t) => t.env.values_mut(),
            TransportConfig::Sse(t) => t.headers.values_mut(),
            TransportConfig::StreamableHttp(t) => t.headers.values_mut(),
        };
        values.for_each(|v| *v = REDACTED.to_string());
    }
    config
}

fn error_json(e: &ValidationError) -> serde_json::Value {
    serde_json::json!({
        "scope": e.scope,
        "field": e.field,
        "message": e.message,
        "suggestion": e.suggestion,
    })
}

pub async fn execute(args: &ValidateArgs) -> Result<(), ProxyError> {
    let loaded = match config::load(&args.config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Some(errors) = e.validation_errors() {
                report_invalid(args, errors);
            }
            return Err(e);
        }
    };

    match args.format {
        ValidateFormat::Text => print_text(&loaded),
        ValidateFormat::Json => {
            let skipped: Vec<serde_json::Value> = loaded
                .skipped
                .iter()
                .map(|s| serde_json::json!({ "name": s.name, "error": s.error.to_string() }))
                .collect();
            let warnings: Vec<serde_json::Value> = loaded.warnings.iter().map(error_json).collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "version": loaded.version.short(),
                    "config": redacted(&loaded.config),
                    "skipped": skipped,
                    "warnings": warnings,
                })
            );
        }
    }

    Ok(())
}

fn report_invalid(args: &ValidateArgs, errors: &[ValidationError]) {
    match args.format {
        ValidateFormat::Text => {
            eprintln!("\u{2717} {} has {} errors\n", args.config, errors.len());
            for error in errors {
                eprintln!("{error}");
            }
        }
        ValidateFormat::Json => {
            let json_errors: Vec<serde_json::Value> = errors.iter().map(error_json).collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": false,
                    "errors": json_errors,
                })
            );
        }
    }
}

fn print_text(loaded: &LoadedConfig) {
    println!(
        "\u{2713} {}",
        validation::format_validation_report(&loaded.location, &loaded.config)
    );

    if !loaded.skipped.is_empty() {
        println!("\n  skipped legacy clients:");
        for skipped in &loaded.skipped {
            println!("    {}: {}", skipped.name, skipped.error);
        }
    }

    if !loaded.warnings.is_empty() {
        println!("\n  warnings:");
        for warning in &loaded.warnings {
            println!("  {warning}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sources::parse_document;

    #[test]
    fn secrets_are_masked_in_printed_config() {
        let doc = parse_document(
            "json",
            r#"{
                "mcpProxy": {"name": "p", "options": {"authTokens": ["proxy-secret"]}},
                "mcpServers": {
                    "gh": {"command": "npx", "env": {"GITHUB_TOKEN": "ghp_secret"}},
                    "docs": {"transportType": "streamable-http", "url": "http://d", "headers": {"Authorization": "Bearer x"}},
                    "open": {"url": "http://o", "options": {"authTokens": []}}
                }
            }"#,
            "test",
        )
        .unwrap();
        let config = config::resolve(doc).unwrap().config;

        let printed = serde_json::to_string(&redacted(&config)).unwrap();
        assert!(!printed.contains("proxy-secret"));
        assert!(!printed.contains("ghp_secret"));
        assert!(!printed.contains("Bearer x"));

        let value = serde_json::to_value(redacted(&config)).unwrap();
        assert_eq!(value["mcpServers"]["gh"]["env"]["GITHUB_TOKEN"], REDACTED);
        assert_eq!(value["mcpServers"]["gh"]["command"], "npx");
        assert_eq!(value["mcpServers"]["gh"]["options"]["authTokens"][0], REDACTED);
        assert_eq!(value["mcpServers"]["open"]["options"]["authTokens"], serde_json::json!([]));
        assert_eq!(value["mcpProxy"]["options"]["authTokens"][0], REDACTED);
    }
}
