//! Fetch-all command - resolve every image in the library

use anyhow::{Context, Result};
use dockyard_core::SourceConfig;
use dockyard_source::{DockerFileSource, LocationFetcher};
use tracing::info;

pub async fn run(config: &SourceConfig) -> Result<()> {
    let source = DockerFileSource::new(config, LocationFetcher)
        .await
        .with_context(|| format!("Failed to open library mirror of {}", config.mirror_url))?;

    let mut locations: Vec<_> = source
        .fetch_all()
        .await
        .context("Failed to resolve library")?
        .into_iter()
        .collect();
    locations.sort();

    for location in &locations {
        println!("{}", location);
    }
    info!("Resolved {} Dockerfile(s)", locations.len());

    Ok(())
}
