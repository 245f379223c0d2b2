//! `mcp-proxy health`: check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON.

use http_body_util::BodyExt;

use crate::cli::HealthArgs;
use crate::config::sources::http_source::build_http_client;
use crate::error::ProxyError;
use crate::health::HealthResponse;

pub async fn execute(args: HealthArgs) -> Result<(), ProxyError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let uri: hyper::Uri =
        url.parse().map_err(
            |e: hyper::http::uri::InvalidUri| ProxyError::UriParse {
                source: Box::new(e),
            },
        )?;

    let client = build_http_client();

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| ProxyError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| ProxyError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| ProxyError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| ProxyError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(ProxyError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => print_health(&args.url, &health),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn print_health(url: &str, health: &HealthResponse) {
    println!("\u{2713} mcp-proxy is healthy ({url})");
    println!("  build:          {}", health.version);
    println!("  uptime:         {}", format_uptime(health.uptime_seconds));
    println!(
        "  proxy:          {} v{} ({})",
        health.proxy.name, health.proxy.version, health.proxy.base_url
    );
    println!(
        "  servers:        {} (config from {}, version {})",
        health.config.servers, health.config.source, health.config.version
    );
    for server in &health.servers {
        let mut flags = Vec::new();
        if server.auth_required {
            flags.push("auth");
        }
        if server.tool_filter {
            flags.push("filtered");
        }
        if server.log_enabled {
            flags.push("logged");
        }
        println!(
            "    {:<20} {:<16} {}",
            server.name,
            server.transport,
            flags.join(", ")
        );
    }
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
