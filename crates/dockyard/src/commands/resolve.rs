//! Resolve command - look up the Dockerfiles of one image

use anyhow::{Context, Result};
use dockyard_core::{ImageName, SourceConfig};
use dockyard_source::{DockerFileSource, LocationFetcher};
use tracing::warn;

use crate::cli::ResolveArgs;

pub async fn run(args: ResolveArgs, config: &SourceConfig) -> Result<()> {
    let image = ImageName::parse(&args.image)
        .with_context(|| format!("Invalid image name '{}'", args.image))?;

    let source = DockerFileSource::new(config, LocationFetcher)
        .await
        .with_context(|| format!("Failed to open library mirror of {}", config.mirror_url))?;

    let mut locations: Vec<_> = source
        .fetch_docker_file(&image)
        .await
        .with_context(|| format!("Failed to resolve {}", image))?
        .into_iter()
        .collect();

    if locations.is_empty() {
        warn!("No Dockerfile found for {}", image);
        return Ok(());
    }

    locations.sort();
    for location in &locations {
        println!("{}", location);
    }

    Ok(())
}
