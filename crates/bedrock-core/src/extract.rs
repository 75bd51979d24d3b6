use std::sync::OnceLock;

use bedrock_model::{ExtractionError, ServerVersion, VersionParseError};
use regex::Regex;

static SERVER_ARCHIVE: OnceLock<Regex> = OnceLock::new();

fn server_archive_re() -> &'static Regex {
    SERVER_ARCHIVE.get_or_init(|| {
        Regex::new(r"bedrock-server-([0-9]+\.[0-9]+(?:\.[0-9]+){0,2})\.zip")
            .expect("compile SERVER_ARCHIVE")
    })
}

/// Pull the raw version out of a `bedrock-server-<version>.zip` link.
///
/// The first match wins and the substring is returned untouched, so
/// `bedrock-server-1.21.50.3.zip` yields `1.21.50.3`.
///
/// # Errors
/// Returns an error when the URL has no recognizable server archive name.
pub fn extract_version(url: &str) -> Result<&str, ExtractionError> {
    server_archive_re()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractionError {
            url: url.to_string(),
        })
}

/// Reduce a raw version to the two or three segments used as a ledger key.
///
/// # Errors
/// Returns an error if the version has fewer than two numeric segments.
pub fn normalize_version(raw: &str) -> Result<ServerVersion, VersionParseError> {
    raw.parse()
}
