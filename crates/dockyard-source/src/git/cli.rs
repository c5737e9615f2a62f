//! Git client backed by the `git` command line

use super::{GitClient, PullOutcome};
use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// [`GitClient`] that shells out to the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    /// Locate `git` on the PATH
    ///
    /// # Errors
    /// Returns `GitNotFound` when no git binary is installed
    pub fn locate() -> Result<Self> {
        let program = which::which("git").map_err(|_| Error::GitNotFound)?;
        debug!("Using git binary at {}", program.display());
        Ok(Self { program })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        // Never block on a credential prompt.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

#[async_trait]
impl GitClient for GitCli {
    async fn clone_repository(&self, url: &str, destination: &Utf8Path) -> Result<()> {
        debug!("Running: git clone {} {}", url, destination);

        let output = self
            .command()
            .arg("clone")
            .arg(url)
            .arg(destination.as_str())
            .output()
            .await
            .map_err(|e| Error::clone_failed(url, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::clone_failed(url, stderr.trim()));
        }

        Ok(())
    }

    async fn pull(&self, repository: &Utf8Path) -> Result<PullOutcome> {
        debug!("Running: git pull in {}", repository);

        let output = self
            .command()
            .current_dir(repository)
            .args(["pull", "--ff-only"])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::git_operation(format!(
                "git pull failed in {}: {}",
                repository,
                stderr.trim()
            )));
        }

        Ok(parse_pull_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

fn parse_pull_output(stdout: &str) -> PullOutcome {
    let summary = stdout.lines().next().unwrap_or_default().trim().to_string();
    let updated = !summary.is_empty()
        && !stdout.contains("Already up to date")
        && !stdout.contains("Already up-to-date");
    PullOutcome { updated, summary }
}
