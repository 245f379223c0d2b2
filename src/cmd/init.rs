//! `mcp-proxy init`: generate a starter configuration file.
//!
//! Writes a JSON, YAML, or TOML document in the current schema, either
//! minimal or with every option spelled out. Never overwrites.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::ProxyError;

pub fn execute(args: &InitArgs) -> Result<(), ProxyError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("config.{}", args.format.extension())));

    if output.exists() {
        return Err(ProxyError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const JSON_MINIMAL: &str = r#"{
  "mcpProxy": {
    "baseURL": "http://localhost:9090",
    "addr": ":9090",
    "name": "MCP Proxy",
    "version": "1.0.0"
  },
  "mcpServers": {
    "fetch": {
      "command": "uvx",
      "args": ["mcp-server-fetch"]
    }
  }
}
"#;

const JSON_FULL: &str = r#"{
  "mcpProxy": {
    "baseURL": "https://mcp.example.com",
    "addr": ":9090",
    "name": "MCP Proxy",
    "version": "1.0.0",
    "options": {
      "panicIfInvalid": false,
      "logEnabled": true,
      "authTokens": ["change-me"]
    }
  },
  "mcpServers": {
    "github": {
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-github"],
      "env": {
        "GITHUB_PERSONAL_ACCESS_TOKEN": "<YOUR_TOKEN>"
      },
      "options": {
        "toolFilter": {
          "mode": "block",
          "list": ["create_or_update_file"]
        }
      }
    },
    "fetch": {
      "command": "uvx",
      "args": ["mcp-server-fetch"],
      "options": {
        "panicIfInvalid": true,
        "logEnabled": false,
        "authTokens": []
      }
    },
    "amap": {
      "url": "https://mcp.amap.com/sse?key=<YOUR_KEY>"
    },
    "docs": {
      "transportType": "streamable-http",
      "url": "https://docs.example.com/mcp",
      "headers": {
        "Authorization": "Bearer <YOUR_TOKEN>"
      },
      "timeout": 30000000000
    }
  }
}
"#;

const YAML_MINIMAL: &str = r#"# mcp-proxy config

mcpProxy:
  baseURL: "http://localhost:9090"
  addr: ":9090"
  name: "MCP Proxy"
  version: "1.0.0"

mcpServers:
  fetch:
    command: "uvx"
    args: ["mcp-server-fetch"]
"#;

const YAML_FULL: &str = r#"# mcp-proxy config
#
# Options set under mcpProxy apply to every server that leaves them unset.
# toolFilter is never inherited.

mcpProxy:
  baseURL: "https://mcp.example.com"
  addr: ":9090"                 # ":port" listens on every interface
  name: "MCP Proxy"
  version: "1.0.0"
  options:
    panicIfInvalid: false       # abort startup when a server fails to start
    logEnabled: true
    authTokens: ["change-me"]   # omit to disable auth

mcpServers:
  # stdio: selected whenever a command is present
  github:
    command: "npx"
    args: ["-y", "@modelcontextprotocol/server-github"]
    env:
      GITHUB_PERSONAL_ACCESS_TOKEN: "<YOUR_TOKEN>"
    options:
      toolFilter:
        mode: "block"           # allow | block
        list: ["create_or_update_file"]

  fetch:
    command: "uvx"
    args: ["mcp-server-fetch"]
    options:
      panicIfInvalid: true
      logEnabled: false
      authTokens: []            # explicitly no tokens, proxy tokens not inherited

  # sse: the default for a url
  amap:
    url: "https://mcp.amap.com/sse?key=<YOUR_KEY>"

  # streamable-http must be requested explicitly
  docs:
    transportType: "streamable-http"
    url: "https://docs.example.com/mcp"
    headers:
      Authorization: "Bearer <YOUR_TOKEN>"
    timeout: 30000000000        # nanoseconds
"#;

const TOML_MINIMAL: &str = r#"# mcp-proxy config

[mcpProxy]
baseURL = "http://localhost:9090"
addr = ":9090"
name = "MCP Proxy"
version = "1.0.0"

[mcpServers.fetch]
command = "uvx"
args = ["mcp-server-fetch"]
"#;

const TOML_FULL: &str = r#"# mcp-proxy config
#
# Options set under mcpProxy apply to every server that leaves them unset.
# toolFilter is never inherited.

[mcpProxy]
baseURL = "https://mcp.example.com"
addr = ":9090"
name = "MCP Proxy"
version = "1.0.0"

[mcpProxy.options]
panicIfInvalid = false
logEnabled = true
authTokens = ["change-me"]

[mcpServers.github]
command = "npx"
args = ["-y", "@modelcontextprotocol/server-github"]

[mcpServers.github.env]
GITHUB_PERSONAL_ACCESS_TOKEN = "<YOUR_TOKEN>"

[mcpServers.github.options.toolFilter]
mode = "block"
list = ["create_or_update_file"]

[mcpServers.fetch]
command = "uvx"
args = ["mcp-server-fetch"]

[mcpServers.fetch.options]
panicIfInvalid = true
logEnabled = false
authTokens = []

[mcpServers.amap]
url = "https://mcp.amap.com/sse?key=<YOUR_KEY>"

[mcpServers.docs]
transportType = "streamable-http"
url = "https://docs.example.com/mcp"
timeout = 30000000000

[mcpServers.docs.headers]
Authorization = "Bearer <YOUR_TOKEN>"
"#;
