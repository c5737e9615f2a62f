//! Local mirror of the upstream library repository
//!
//! The mirror is cloned once, when the workspace has no working copy yet,
//! and then refreshed lazily: [`LibraryMirror::ensure_fresh`] pulls at most
//! once per refresh interval, whether the previous pull succeeded or not.
//! A failed pull leaves the last good working copy in place.

use crate::error::{Error, Result};
use crate::git::GitClient;
use camino::{Utf8Path, Utf8PathBuf};
use dockyard_core::SourceConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

const GIT_DIRECTORY: &str = ".git";
const WRITE_PROBE: &str = ".dockyard-write-probe";

/// What a call to [`LibraryMirror::ensure_fresh`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Pull succeeded
    Pulled,
    /// Pull was attempted and failed; the previous working copy is kept
    Failed,
    /// Last pull is more recent than the refresh interval
    TooSoon,
    /// Another caller is pulling right now
    InProgress,
}

/// Working copy of the upstream library repository
pub struct LibraryMirror {
    url: String,
    directory: Utf8PathBuf,
    refresh_interval: Duration,
    git: Arc<dyn GitClient>,
    last_refresh: Mutex<Option<Instant>>,
}

impl LibraryMirror {
    /// Attach to the mirror described by `config`, cloning it first if needed
    pub async fn from_config(config: &SourceConfig, git: Arc<dyn GitClient>) -> Result<Self> {
        config.validate()?;
        prepare_workspace(&config.workspace).await?;
        Self::open(
            config.mirror_url.clone(),
            config.mirror_dir(),
            config.refresh_interval(),
            git,
        )
        .await
    }

    /// Attach to an existing working copy at `directory`, or clone `url` into it
    ///
    /// # Errors
    /// Returns `CloneFailed` when no working copy exists and the clone fails;
    /// the mirror cannot serve anything without one successful copy.
    pub async fn open(
        url: impl Into<String>,
        directory: impl Into<Utf8PathBuf>,
        refresh_interval: Duration,
        git: Arc<dyn GitClient>,
    ) -> Result<Self> {
        let url = url.into();
        let directory = directory.into();

        let last_refresh = if directory.join(GIT_DIRECTORY).exists() {
            debug!("Attaching to existing mirror at {}", directory);
            None
        } else {
            tokio::fs::create_dir_all(&directory).await?;
            debug!("Cloning {} into {}", url, directory);
            git.clone_repository(&url, &directory).await?;
            info!("Cloned repository {}", url);
            Some(Instant::now())
        };

        Ok(Self {
            url,
            directory,
            refresh_interval,
            git,
            last_refresh: Mutex::new(last_refresh),
        })
    }

    /// Root of the working copy
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// When the last refresh attempt completed, if any
    pub async fn last_refresh(&self) -> Option<Instant> {
        *self.last_refresh.lock().await
    }

    /// Pull from upstream if the refresh interval has elapsed
    ///
    /// Only one caller pulls at a time; concurrent callers return
    /// [`RefreshOutcome::InProgress`] right away and read the current
    /// working copy. Every attempt, successful or not, stamps the time it
    /// started, so a failing upstream is retried once per interval at most
    /// and a slow pull does not push the next window back. Never fails:
    /// pull errors are logged.
    pub async fn ensure_fresh(&self) -> RefreshOutcome {
        let Ok(mut last_refresh) = self.last_refresh.try_lock() else {
            debug!("Mirror refresh already in progress, using current working copy");
            return RefreshOutcome::InProgress;
        };

        if let Some(last) = *last_refresh {
            if last.elapsed() <= self.refresh_interval {
                debug!("Last pull of {} done too recently, skipping", self.url);
                return RefreshOutcome::TooSoon;
            }
        }

        let started = Instant::now();
        let outcome = match self.git.pull(&self.directory).await {
            Ok(pull) => {
                debug!(
                    "Successfully pulled {} ({})",
                    self.url,
                    if pull.updated { pull.summary.as_str() } else { "no changes" }
                );
                RefreshOutcome::Pulled
            }
            Err(e) => {
                warn!("Unable to pull from {}: {}", self.url, e);
                RefreshOutcome::Failed
            }
        };

        *last_refresh = Some(started);
        outcome
    }
}

/// Create the workspace if needed and check that it accepts writes
pub async fn prepare_workspace(workspace: &Utf8Path) -> Result<()> {
    if !workspace.exists() {
        match tokio::fs::create_dir_all(workspace).await {
            Ok(()) => trace!("Workspace {} created", workspace),
            Err(e) => trace!("Workspace {} NOT created: {}", workspace, e),
        }
    }

    if !workspace.is_dir() {
        return Err(Error::workspace_not_writable(workspace.as_str()));
    }

    let probe = workspace.join(WRITE_PROBE);
    tokio::fs::write(&probe, b"")
        .await
        .map_err(|_| Error::workspace_not_writable(workspace.as_str()))?;
    if let Err(e) = tokio::fs::remove_file(&probe).await {
        trace!("Could not remove write probe {}: {}", probe, e);
    }

    Ok(())
}
