//! Build script embedding the build version at compile time.
//!
//! Sets `MCP_PROXY_BUILD_VERSION` for `env!()` in the crate root: the
//! crate version, followed by the short git revision when git is
//! available. Docker builds without `.git` can pass the revision via
//! `MCP_PROXY_GIT_SHORT_OVERRIDE`.

use std::process::Command;

/// Try an override env var first (for Docker builds), then fall back to git.
fn git_or_env(env_key: &str, args: &[&str]) -> Option<String> {
    println!("cargo:rerun-if-env-changed={env_key}");
    std::env::var(env_key)
        .ok()
        .filter(|s| !s.is_empty() && s != "unknown")
        .or_else(|| {
            Command::new("git")
                .args(args)
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

fn main() {
    // Re-run when HEAD changes (branch switch, new commit)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "dev".into());
    let build_version = match git_or_env(
        "MCP_PROXY_GIT_SHORT_OVERRIDE",
        &["rev-parse", "--short", "HEAD"],
    ) {
        Some(rev) => format!("{version} ({rev})"),
        None => version,
    };
    println!("cargo:rustc-env=MCP_PROXY_BUILD_VERSION={build_version}");
}
