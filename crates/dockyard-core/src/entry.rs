//! Source-control entries parsed from library files

use crate::image::ImageName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the Dockerfile for one image tag lives
///
/// Reads as: the Dockerfile for `image` is in `repository_url` at
/// `revision`, under `subdirectory`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScmEntry {
    /// Image identity this entry builds
    pub image: ImageName,
    /// Repository holding the Dockerfile
    pub repository_url: String,
    /// Commit or ref to check out
    pub revision: String,
    /// Directory of the Dockerfile within the repository
    pub subdirectory: String,
}

impl ScmEntry {
    pub fn new(
        image: ImageName,
        repository_url: impl Into<String>,
        revision: impl Into<String>,
        subdirectory: impl Into<String>,
    ) -> Self {
        Self {
            image,
            repository_url: repository_url.into(),
            revision: revision.into(),
            subdirectory: subdirectory.into(),
        }
    }
}

impl fmt::Display for ScmEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}@{} {}",
            self.image, self.repository_url, self.revision, self.subdirectory
        )
    }
}
