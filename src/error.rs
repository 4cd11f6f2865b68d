// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    /// The current directory could not be listed (share gone, permission revoked, folder deleted).
    #[error("cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a folder", .0.display())]
    NotAFolder(PathBuf),
}

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("{} is not a recognized video", .0.display())]
    NotAVideo(PathBuf),
    #[error("no video player available (tried: {})", tried.join(", "))]
    NoPlayerAvailable { tried: Vec<String> },
    #[error("{} is not a document", .0.display())]
    NotADocument(PathBuf),
    #[error("no application available to open documents (tried: {})", tried.join(", "))]
    NoOpenerAvailable { tried: Vec<String> },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum MountError {
    #[error("mount tool `{0}` is not installed")]
    ToolMissing(String),
    #[error("mount request timed out after {0}s")]
    TimedOut(u64),
    #[error("mount tool exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("share is not mounted at {}", .0.display())]
    NotMounted(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}
