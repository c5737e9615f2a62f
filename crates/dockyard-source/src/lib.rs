//! # dockyard-source
//!
//! Resolves Docker image names to the source-control location of their
//! Dockerfiles, using a library index repository:
//! - [`LibraryMirror`] keeps a local clone of the index fresh, pulling at
//!   most once per refresh interval
//! - [`parse_library`] reads the per-image library file format
//! - [`ResolutionCache`] remembers the last entry that resolved per image
//! - [`DockerFileSource`] ties them together and delegates each entry to a
//!   [`DockerFileFetcher`]
//!
//! # Example
//!
//! ```no_run
//! use dockyard_core::{ImageName, SourceConfig};
//! use dockyard_source::{DockerFileSource, LocationFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SourceConfig::new(
//!     "/var/lib/dockyard",
//!     "https://github.com/docker-library/official-images",
//! );
//! let source = DockerFileSource::new(&config, LocationFetcher).await?;
//!
//! let image = ImageName::parse("library/alpine:3.18")?;
//! for location in source.fetch_docker_file(&image).await? {
//!     println!("{}", location);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod git;
pub mod library;
pub mod mirror;
pub mod source;

pub use cache::ResolutionCache;
pub use error::{Error, Result};
pub use fetcher::{DockerFileFetcher, DockerFileLocation, LocationFetcher};
pub use git::{GitCli, GitClient, PullOutcome};
pub use library::{parse_library, LibraryFile, LibraryTree};
pub use mirror::{LibraryMirror, RefreshOutcome};
pub use source::DockerFileSource;
