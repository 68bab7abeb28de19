//! Commit error types

use thiserror::Error;

/// Errors returned by the remote resource API
#[derive(Error, Debug)]
pub enum CommitError {
    /// The server refused the call; the cause is opaque to the console
    #[error("Remote call rejected: {0}")]
    Rejected(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CommitError>;
