//! mcp-proxy puts many MCP servers behind a single HTTP endpoint.
//!
//! The heart of the crate is [`config`]: it reads one document, migrates
//! the deprecated flat schema into the current one, resolves every backend
//! to exactly one transport, and cascades proxy-wide options into each
//! backend. The resolved [`Config`](config::model::Config) is immutable and
//! handed to the listener.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, validate, init, health).
//! - [`config`] -- Loading (file or URL), legacy migration, option inheritance,
//!   and validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler describing the resolved backends.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum listener shell, shared state, and graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config documents _(enabled by default)_ |
//! | `toml` | TOML config documents |
//! | `all-formats` | All document formats |
//!
//! JSON documents are always supported.

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;

/// Version reported by `--version` and `/health`: the crate version plus
/// the git revision when one was available at build time.
pub const BUILD_VERSION: &str = env!("MCP_PROXY_BUILD_VERSION");
