//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`validate`], [`init`], or [`health`].
//! Each handler lives in its own submodule.

pub mod health;
pub mod init;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::ProxyError;

pub async fn dispatch(cli: Cli) -> Result<(), ProxyError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = crate::BUILD_VERSION;
    println!(
        "\n  mcp-proxy {version}: one endpoint in front of many MCP servers\n\n  \
         No command provided. To get started:\n\n    \
         mcp-proxy init                    Generate a starter config.json\n    \
         mcp-proxy validate                Check ./config.json and show what it resolves to\n    \
         mcp-proxy run                     Start the proxy with ./config.json\n    \
         mcp-proxy --help                  See all commands and options\n"
    );
}
