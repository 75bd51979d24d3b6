use thiserror::Error;

use crate::types::{Channel, LinkCategory, VersionParseError};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("missing download URL for {category}")]
    MissingDownloadLink { category: LinkCategory },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("version mismatch in {channel} release: Windows={windows}, Linux={linux}")]
    VersionMismatch {
        channel: Channel,
        windows: String,
        linux: String,
    },

    #[error(transparent)]
    InvalidVersionFormat(#[from] VersionParseError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to extract version from URL: {url}")]
pub struct ExtractionError {
    pub url: String,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build download links client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("failed to fetch download links from {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download links request failed with HTTP {status}{body_snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body_snippet: String,
    },
    #[error("failed to parse download links response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to read ledger from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize ledger: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write ledger to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn parse_from<E>(error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Parse(error.to_string())
    }
}
