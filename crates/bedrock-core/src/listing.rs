use std::cmp::Ordering;

use bedrock_model::{Channel, Ledger, VersionRecord};
use semver::Version;

/// Versions of one channel, newest first.
///
/// Two-segment keys sort as `x.y.0`; keys that are not versions at all sort
/// after every real version, alphabetically.
#[must_use]
pub fn sorted_versions(ledger: &Ledger, channel: Channel) -> Vec<(&str, &VersionRecord)> {
    let mut entries: Vec<_> = ledger
        .section(channel)
        .iter()
        .map(|(key, record)| (key.as_str(), record))
        .collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    entries
}

#[must_use]
pub fn latest_version(ledger: &Ledger, channel: Channel) -> Option<&str> {
    sorted_versions(ledger, channel)
        .first()
        .map(|(key, _)| *key)
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (as_semver(a), as_semver(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn as_semver(key: &str) -> Option<Version> {
    if let Ok(version) = Version::parse(key) {
        return Some(version);
    }
    let (major, minor) = key.split_once('.')?;
    Version::parse(&format!("{major}.{minor}.0")).ok()
}
