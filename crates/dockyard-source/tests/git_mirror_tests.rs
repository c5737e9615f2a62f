//! Integration tests against a real git repository
//!
//! A local upstream repository stands in for the remote index. Skipped
//! when git is not installed.

use camino::{Utf8Path, Utf8PathBuf};
use dockyard_core::{ImageName, SourceConfig};
use dockyard_source::{DockerFileSource, LocationFetcher, RefreshOutcome};
use std::fs;
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;

fn git_available() -> bool {
    which::which("git").is_ok()
}

fn git(dir: &Utf8Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(dir)
        .args([
            "-c",
            "user.name=Dockyard Test",
            "-c",
            "user.email=test@dockyard.invalid",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit_library_file(upstream: &Utf8Path, relative: &str, content: &str, message: &str) {
    let path = upstream.join("library").join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    git(upstream, &["add", "."]);
    git(upstream, &["commit", "-m", message]);
}

fn upstream_repo(temp_dir: &TempDir) -> Utf8PathBuf {
    let upstream = Utf8PathBuf::from_path_buf(temp_dir.path().join("upstream")).unwrap();
    fs::create_dir_all(&upstream).unwrap();
    git(&upstream, &["init"]);
    commit_library_file(
        &upstream,
        "library/alpine",
        "3.18: https://github.com/alpinelinux/docker-alpine@abc123 .\n",
        "Add alpine",
    );
    upstream
}

#[tokio::test]
async fn test_clone_then_pull_new_tags() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let upstream = upstream_repo(&temp_dir);
    let workspace = Utf8PathBuf::from_path_buf(temp_dir.path().join("workspace")).unwrap();
    let config = SourceConfig::new(workspace, upstream.as_str())
        .with_refresh_interval(Duration::ZERO);

    let source = DockerFileSource::new(&config, LocationFetcher).await.unwrap();
    assert!(config.mirror_dir().join(".git").exists());

    let locations = source.fetch_all().await.unwrap();
    assert_eq!(locations.len(), 1);
    let location = locations.into_iter().next().unwrap();
    assert_eq!(location.path, "Dockerfile");
    assert_eq!(location.revision, "abc123");

    commit_library_file(
        &upstream,
        "library/alpine",
        "3.18: https://github.com/alpinelinux/docker-alpine@abc123 .\n\
         3.19: https://github.com/alpinelinux/docker-alpine@def456 x86_64\n",
        "Add alpine 3.19",
    );

    let image = ImageName::parse("library/alpine:3.19").unwrap();
    let locations = source.fetch_docker_file(&image).await.unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(
        locations.into_iter().next().unwrap().path,
        "x86_64/Dockerfile"
    );
    assert_eq!(source.cached_entry(&image).await.unwrap().revision, "def456");
}

#[tokio::test]
async fn test_reopen_attaches_without_cloning() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let upstream = upstream_repo(&temp_dir);
    let workspace = Utf8PathBuf::from_path_buf(temp_dir.path().join("workspace")).unwrap();
    let config = SourceConfig::new(workspace, upstream.as_str());

    let first = DockerFileSource::new(&config, LocationFetcher).await.unwrap();
    assert!(first.mirror().last_refresh().await.is_some());
    drop(first);

    // Upstream gone: attaching must not need it, only pulling does.
    fs::remove_dir_all(&upstream).unwrap();
    let second = DockerFileSource::new(&config, LocationFetcher).await.unwrap();
    assert!(second.mirror().last_refresh().await.is_none());

    assert_eq!(second.mirror().ensure_fresh().await, RefreshOutcome::Failed);
    let locations = second.fetch_all().await.unwrap();
    assert_eq!(locations.len(), 1, "stale mirror keeps serving");
}

#[tokio::test]
async fn test_clone_of_missing_upstream_fails() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let workspace = Utf8PathBuf::from_path_buf(temp_dir.path().join("workspace")).unwrap();
    let missing = temp_dir.path().join("does-not-exist");
    let config = SourceConfig::new(workspace, missing.to_string_lossy());

    let result = DockerFileSource::new(&config, LocationFetcher).await;
    assert!(matches!(
        result,
        Err(dockyard_source::Error::CloneFailed { .. })
    ));
}
