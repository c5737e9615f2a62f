//! Shared fixtures for dockyard-source integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use dockyard_core::{ScmEntry, SourceConfig};
use dockyard_source::{DockerFileFetcher, Error, GitClient, PullOutcome, Result};
use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

pub const MIRROR_URL: &str = "https://github.com/docker-library/official-images";

pub const ALPINE_LIBRARY: &str = "3.18: https://github.com/alpinelinux/docker-alpine@abc123 .\n";

pub const PHP_LIBRARY: &str = "# maintained upstream\n\
                               8.0: https://example.com/php.git@abcdef1 docker/8.0\n\
                               \n\
                               9.0: https://example.com/php.git@deadbee docker/9.0\n";

/// Git client that records calls instead of touching the network
#[derive(Default)]
pub struct FakeGit {
    pub clones: AtomicUsize,
    pub pulls: AtomicUsize,
    /// Files (relative to the clone root) written by a clone
    pub seed: Vec<(String, String)>,
    pub fail_clone: bool,
    pub pull_delay: Option<Duration>,
}

impl FakeGit {
    pub fn seeded(seed: &[(&str, &str)]) -> Self {
        Self {
            seed: seed
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn clone_count(&self) -> usize {
        self.clones.load(Ordering::SeqCst)
    }

    pub fn pull_count(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GitClient for FakeGit {
    async fn clone_repository(&self, url: &str, destination: &Utf8Path) -> Result<()> {
        self.clones.fetch_add(1, Ordering::SeqCst);
        if self.fail_clone {
            return Err(Error::clone_failed(url, "could not resolve host"));
        }
        fs::create_dir_all(destination.join(".git"))?;
        for (path, content) in &self.seed {
            let file = destination.join(path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, content)?;
        }
        Ok(())
    }

    async fn pull(&self, _repository: &Utf8Path) -> Result<PullOutcome> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.pull_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(PullOutcome::default())
    }
}

/// Fetcher that resolves every entry to itself, except declined tags
#[derive(Default)]
pub struct RecordingFetcher {
    pub declined_tags: HashSet<String>,
    pub seen: Mutex<Vec<ScmEntry>>,
}

impl RecordingFetcher {
    pub fn declining(tags: &[&str]) -> Self {
        Self {
            declined_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn seen_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl DockerFileFetcher for RecordingFetcher {
    type Artifact = ScmEntry;

    async fn fetch(&self, entry: &ScmEntry) -> Option<ScmEntry> {
        self.seen.lock().unwrap().push(entry.clone());
        match entry.image.tag() {
            Some(tag) if self.declined_tags.contains(tag) => None,
            _ => Some(entry.clone()),
        }
    }
}

/// Temporary workspace holding an already cloned mirror
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub config: SourceConfig,
}

impl TestWorkspace {
    /// Workspace with no mirror yet
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Utf8PathBuf::from_path_buf(temp_dir.path().join("workspace")).unwrap();
        let config = SourceConfig::new(workspace, MIRROR_URL);
        Self { temp_dir, config }
    }

    /// Workspace whose mirror is already present, with an empty library
    pub fn with_mirror() -> Self {
        let ws = Self::empty();
        fs::create_dir_all(ws.config.mirror_dir().join(".git")).unwrap();
        fs::create_dir_all(ws.config.library_dir()).unwrap();
        ws
    }

    /// Write a library file at `<library>/<relative>`
    pub fn write_library_file(&self, relative: &str, content: impl AsRef<[u8]>) {
        let path = self.config.library_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn library_dir(&self) -> Utf8PathBuf {
        self.config.library_dir()
    }
}
