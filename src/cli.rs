//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, validate, init, health), and their associated
//! argument structs. The config location and log level can also come
//! from the environment for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "mcp-proxy",
    version = crate::BUILD_VERSION,
    about = "Aggregate many MCP servers behind a single HTTP endpoint",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        mcp-proxy init                         Create a starter config.json\n  \
        mcp-proxy run                          Start with ./config.json\n  \
        mcp-proxy run -c https://host/c.json   Start with a remote config"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the config and start the proxy listener
    Run(RunArgs),

    /// Load and resolve a config without starting
    Validate(ValidateArgs),

    /// Generate a starter config file
    Init(InitArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        mcp-proxy run                                    ./config.json\n  \
        mcp-proxy run -c proxy.yaml --pretty             Local dev mode\n  \
        mcp-proxy run -c https://cfg.internal/mcp.json   Remote config")]
pub struct RunArgs {
    /// Path to a config file or an http(s) URL
    #[arg(short, long, env = "MCP_PROXY_CONFIG", default_value = "config.json")]
    pub config: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a config file or an http(s) URL
    #[arg(default_value = "config.json")]
    pub config: String,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        mcp-proxy init                            Minimal config.json\n  \
        mcp-proxy init --full                     Every option spelled out\n  \
        mcp-proxy init -f yaml -o proxy.yaml      YAML output")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spell out every option with example values
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:9090")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
