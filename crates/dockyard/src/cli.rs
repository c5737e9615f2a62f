//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Dockyard - resolve Docker images to the source of their Dockerfiles
#[derive(Parser, Debug)]
#[command(name = "dockyard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to dockyard.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Workspace directory (overrides config and DOCKYARD_WORKSPACE)
    #[arg(long, global = true)]
    pub workspace: Option<Utf8PathBuf>,

    /// Library repository URL (overrides config and DOCKYARD_MIRROR_URL)
    #[arg(long, global = true)]
    pub mirror_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every image listed in the library
    FetchAll,

    /// Resolve one image
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Image name, e.g. library/alpine:3.18 (all tags when no tag is given)
    pub image: String,
}
