//! Error types for dockyard-source

use thiserror::Error;

/// Result type alias using dockyard-source's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Dockerfile source error types
#[derive(Error, Debug)]
pub enum Error {
    /// Workspace cannot be created or written to
    #[error("Unable to write in workspace directory: {path}")]
    WorkspaceNotWritable { path: String },

    /// Initial clone of the mirror failed
    #[error("Failed to clone repository {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Library directory vanished from the mirror
    #[error("Library directory {path} seems to not exist anymore")]
    LibraryDirMissing { path: String },

    /// Library file could not be read
    #[error("Unable to read library file {path}: {source}")]
    LibraryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Caller passed an unusable image identity
    #[error("Invalid image name: {message}")]
    InvalidImageName { message: String },

    /// Blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] dockyard_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a workspace not writable error
    pub fn workspace_not_writable(path: impl Into<String>) -> Self {
        Self::WorkspaceNotWritable { path: path.into() }
    }

    /// Create a clone failed error
    pub fn clone_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CloneFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a library directory missing error
    pub fn library_dir_missing(path: impl Into<String>) -> Self {
        Self::LibraryDirMissing { path: path.into() }
    }

    /// Create a library read error
    pub fn library_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::LibraryRead {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid image name error
    pub fn invalid_image_name(message: impl Into<String>) -> Self {
        Self::InvalidImageName {
            message: message.into(),
        }
    }
}
