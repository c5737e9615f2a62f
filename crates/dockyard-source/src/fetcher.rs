//! Dockerfile fetcher capability
//!
//! The source hands every parsed [`ScmEntry`] to a [`DockerFileFetcher`],
//! which turns it into whatever artifact the caller builds from. Returning
//! `None` declines the entry: it is left out of the results and never
//! cached.

use async_trait::async_trait;
use dockyard_core::{ImageName, ScmEntry};
use std::fmt;
use std::hash::Hash;

/// Turns a library entry into a usable build artifact
#[async_trait]
pub trait DockerFileFetcher: Send + Sync {
    /// Artifact produced for a resolved entry
    type Artifact: Eq + Hash + Send;

    /// Resolve `entry`, or `None` if it cannot be resolved
    async fn fetch(&self, entry: &ScmEntry) -> Option<Self::Artifact>;
}

/// Location of a Dockerfile, derived from an entry without any network access
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DockerFileLocation {
    pub image: ImageName,
    pub repository_url: String,
    pub revision: String,
    /// Path of the Dockerfile inside the repository
    pub path: String,
}

impl fmt::Display for DockerFileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}@{}\t{}",
            self.image, self.repository_url, self.revision, self.path
        )
    }
}

/// Fetcher that accepts every entry with a repository and a revision
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationFetcher;

#[async_trait]
impl DockerFileFetcher for LocationFetcher {
    type Artifact = DockerFileLocation;

    async fn fetch(&self, entry: &ScmEntry) -> Option<DockerFileLocation> {
        if entry.repository_url.is_empty() || entry.revision.is_empty() {
            return None;
        }

        let subdirectory = entry.subdirectory.trim_matches('/');
        let path = match subdirectory {
            "" | "." => "Dockerfile".to_string(),
            dir => format!("{}/Dockerfile", dir),
        };

        Some(DockerFileLocation {
            image: entry.image.clone(),
            repository_url: entry.repository_url.clone(),
            revision: entry.revision.clone(),
            path,
        })
    }
}
