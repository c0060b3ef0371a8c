//! Error taxonomy for the backup pipeline.
//!
//! Every variant is fatal: the pipeline never retries, it logs the error and
//! the process exits with status 1. Variants are grouped by the stage that
//! produces them so the log line alone tells where the run stopped.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    /// Keystone answers 400 for bad credentials rather than a distinct
    /// auth-failure status, so bad request is the denied signal.
    #[error("authentication denied")]
    AuthenticationDenied,

    #[error("authentication failed with status {0}")]
    AuthenticationFailed(StatusCode),

    /// Authentication round-trip succeeded but produced no usable session:
    /// empty token, or no object-store endpoint for the requested region.
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("container `{0}` does not exist")]
    ContainerNotFound(String),

    #[error("object `{object}` not found in container `{container}`")]
    ObjectNotFound { container: String, object: String },

    #[error("source path `{0}` has no file name")]
    InvalidSourcePath(PathBuf),

    #[error("unexpected status {status} while {operation}")]
    UnexpectedStatus {
        operation: &'static str,
        status: StatusCode,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Remote and local digests disagree. The source file is left in place.
    #[error("remote hash `{remote}` does not match local hash `{local}`, refusing to remove source file")]
    HashMismatch { local: String, remote: String },

    #[error("failed to remove source file `{path}`: {source}")]
    RemoveSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type BackupResult<T> = Result<T, BackupError>;
