//! Version-control operations used by the library mirror
//!
//! The mirror only ever needs two operations: an initial clone and an
//! in-place pull. [`GitClient`] is the seam between the mirror and the
//! actual client, so tests can substitute a counting fake for [`GitCli`].

mod cli;

pub use cli::GitCli;

use crate::error::Result;
use async_trait::async_trait;
use camino::Utf8Path;

/// Outcome of a successful pull
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PullOutcome {
    /// Whether new commits were brought in
    pub updated: bool,
    /// First line of the client's report
    pub summary: String,
}

/// Clone and pull operations against an upstream repository
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Clone `url` into `destination`
    ///
    /// `destination` may already exist as an empty directory.
    async fn clone_repository(&self, url: &str, destination: &Utf8Path) -> Result<()>;

    /// Update the working copy at `repository` from its upstream
    async fn pull(&self, repository: &Utf8Path) -> Result<PullOutcome>;
}
