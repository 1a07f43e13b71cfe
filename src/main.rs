#![deny(unsafe_code)]

mod common;
mod config;
mod constants;
mod manager;
mod overlay;
mod resources;
mod x11;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    common::debug::log_system_info();

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let resources = resources::ensure_resources(&cwd);

    manager::run_gui(&resources)
}
