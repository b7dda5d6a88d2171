//! Error types shared by the feed client and the store.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to `{url}` failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing data: {0}")]
    MissingData(String),
}

impl Error {
    /// Whether the failure only concerns one office and the run can go on.
    pub fn is_per_office(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}
