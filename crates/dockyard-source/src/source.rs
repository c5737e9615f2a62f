//! Dockerfile source backed by a library mirror
//!
//! [`DockerFileSource`] ties the pieces together. Every fetch refreshes the
//! mirror (subject to its rate limit), parses the relevant library files,
//! hands each entry to the fetcher and caches the entries that resolved.
//! There is no background refresh: all work happens on the caller's request.

use crate::cache::ResolutionCache;
use crate::error::{Error, Result};
use crate::fetcher::DockerFileFetcher;
use crate::git::{GitCli, GitClient};
use crate::library::{parse_library, LibraryTree};
use crate::mirror::LibraryMirror;
use dockyard_core::{ImageName, ScmEntry, SourceConfig};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Resolves image names to Dockerfile artifacts through the library index
pub struct DockerFileSource<F: DockerFileFetcher> {
    mirror: LibraryMirror,
    library: LibraryTree,
    fetcher: F,
    cache: Arc<ResolutionCache>,
}

impl<F: DockerFileFetcher> DockerFileSource<F> {
    /// Open the source described by `config`, using the system `git`
    ///
    /// # Errors
    /// Fails on invalid configuration, an unwritable workspace, a missing
    /// git binary or a failed initial clone.
    pub async fn new(config: &SourceConfig, fetcher: F) -> Result<Self> {
        let git = Arc::new(GitCli::locate()?);
        Self::with_git(config, git, fetcher).await
    }

    /// Open the source described by `config` with an explicit git client
    pub async fn with_git(
        config: &SourceConfig,
        git: Arc<dyn GitClient>,
        fetcher: F,
    ) -> Result<Self> {
        let mirror = LibraryMirror::from_config(config, git).await?;
        let library = LibraryTree::new(config.library_dir());
        Ok(Self::from_parts(
            mirror,
            library,
            fetcher,
            Arc::new(ResolutionCache::new()),
        ))
    }

    /// Assemble a source from an already opened mirror and a shared cache
    pub fn from_parts(
        mirror: LibraryMirror,
        library: LibraryTree,
        fetcher: F,
        cache: Arc<ResolutionCache>,
    ) -> Self {
        Self {
            mirror,
            library,
            fetcher,
            cache,
        }
    }

    /// Replace the resolution cache, for sharing one cache between sources
    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn mirror(&self) -> &LibraryMirror {
        &self.mirror
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Resolve every entry of every library file
    ///
    /// Unreadable files are logged and skipped. Entries the fetcher
    /// declines are left out.
    ///
    /// # Errors
    /// Returns `LibraryDirMissing` if the library directory is gone
    pub async fn fetch_all(&self) -> Result<HashSet<F::Artifact>> {
        if !self.library.exists() {
            return Err(Error::library_dir_missing(self.library.root().as_str()));
        }

        self.mirror.ensure_fresh().await;

        let library = self.library.clone();
        let entries = tokio::task::spawn_blocking(move || collect_entries(&library)).await?;
        debug!(
            "Found {} library entries under {}",
            entries.len(),
            self.library.root()
        );

        Ok(self.resolve(entries).await)
    }

    /// Resolve the entries of one image
    ///
    /// Without a tag, every tag of the image is resolved. A missing or
    /// unreadable library file is an unknown image and yields an empty set.
    ///
    /// # Errors
    /// Returns `InvalidImageName` if `image` has a blank name, a nested
    /// namespace, or a namespace/name that would leave the library directory
    pub async fn fetch_docker_file(&self, image: &ImageName) -> Result<HashSet<F::Artifact>> {
        validate_image(image)?;

        self.mirror.ensure_fresh().await;

        let library = self.library.clone();
        let lookup = image.clone();
        let file = match tokio::task::spawn_blocking(move || library.read(&lookup)).await? {
            Ok(file) => file,
            Err(e) => {
                error!("{}", e);
                return Ok(HashSet::new());
            }
        };

        let entries = parse_library(&file.content, image.tag(), &image.to_builder())?;
        let artifacts = self.resolve(entries.clone()).await;
        debug!(
            "DockerFile {} successfully fetched with following entries: {:?}",
            image.full_name(),
            entries
        );
        Ok(artifacts)
    }

    /// Last entry that resolved for `image`, without refreshing or fetching
    pub async fn cached_entry(&self, image: &ImageName) -> Option<ScmEntry> {
        self.cache.get(image).await
    }

    async fn resolve(&self, entries: Vec<ScmEntry>) -> HashSet<F::Artifact> {
        let mut artifacts = HashSet::new();
        for entry in entries {
            let Some(artifact) = self.fetcher.fetch(&entry).await else {
                trace!("Fetcher declined {}", entry);
                continue;
            };
            trace!("Resolved {}", entry);
            artifacts.insert(artifact);
            self.cache.put(entry.image.clone(), entry).await;
        }
        artifacts
    }
}

fn collect_entries(library: &LibraryTree) -> Vec<ScmEntry> {
    let mut entries = Vec::new();
    for file in library.files() {
        let file = match file {
            Ok(file) => file,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };
        match parse_library(&file.content, None, &file.image_builder()) {
            Ok(parsed) => entries.extend(parsed),
            Err(e) => error!("Unable to parse library file {}: {}", file.path, e),
        }
    }
    entries
}

fn validate_image(image: &ImageName) -> Result<()> {
    let name = image.name();
    if name.trim().is_empty() {
        return Err(Error::invalid_image_name("image name must be defined"));
    }

    let escapes = |segment: &str| segment.is_empty() || segment == "." || segment == "..";
    if name.contains('/') || escapes(name) {
        return Err(Error::invalid_image_name(format!("'{}' is not a valid name", name)));
    }
    // A namespace is one directory directly under the library root.
    let namespace = image.namespace();
    if !image.is_root_image() && (namespace.contains('/') || escapes(namespace)) {
        return Err(Error::invalid_image_name(format!(
            "'{}' is not a valid namespace",
            namespace
        )));
    }

    Ok(())
}
