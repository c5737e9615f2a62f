//! CLI command implementations

pub mod fetch_all;
pub mod resolve;

use anyhow::{Context, Result};
use dockyard_core::SourceConfig;

use crate::cli::Cli;

/// Resolve the source configuration: config file, then DOCKYARD_* variables, then flags
pub fn load_config(cli: &Cli) -> Result<SourceConfig> {
    let mut config = SourceConfig::load_layered(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(workspace) = &cli.workspace {
        config.workspace = workspace.clone();
    }
    if let Some(url) = &cli.mirror_url {
        config.mirror_url = url.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
