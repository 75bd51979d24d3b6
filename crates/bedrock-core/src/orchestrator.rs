use bedrock_model::{
    Channel, Ledger, LinkCategory, MergeOutcome, Platform, RawLinkSet, ServerVersion,
    TrackerError,
};

use crate::consistency::check_consistency;
use crate::extract::{extract_version, normalize_version};
use crate::merge::merge_version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub channel: Channel,
    pub version: ServerVersion,
    pub outcome: MergeOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub channels: Vec<ChannelOutcome>,
}

impl ProcessReport {
    #[must_use]
    pub fn added(&self) -> usize {
        self.channels
            .iter()
            .filter(|c| c.outcome == MergeOutcome::Added)
            .count()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.added() > 0
    }

    #[must_use]
    pub fn outcome_for(&self, channel: Channel) -> Option<&ChannelOutcome> {
        self.channels.iter().find(|c| c.channel == channel)
    }
}

/// Ensure every required download type is present with a non-empty URL.
///
/// # Errors
/// Returns [`TrackerError::MissingDownloadLink`] naming the first missing
/// category.
pub fn validate_links(links: &RawLinkSet) -> Result<(), TrackerError> {
    match LinkCategory::REQUIRED
        .into_iter()
        .find(|category| links.category(*category).is_none())
    {
        Some(category) => Err(TrackerError::MissingDownloadLink { category }),
        None => Ok(()),
    }
}

fn required_link(
    links: &RawLinkSet,
    channel: Channel,
    platform: Platform,
) -> Result<&str, TrackerError> {
    let category = LinkCategory::new(channel, platform);
    links
        .category(category)
        .ok_or(TrackerError::MissingDownloadLink { category })
}

/// Extract, cross-check, normalize and merge one channel's links.
///
/// # Errors
/// Returns an error if a link is missing, a version cannot be extracted, the
/// platforms disagree, or the version is malformed.
pub fn process_channel(
    ledger: &mut Ledger,
    links: &RawLinkSet,
    channel: Channel,
) -> Result<ChannelOutcome, TrackerError> {
    let windows_url = required_link(links, channel, Platform::Windows)?;
    let linux_url = required_link(links, channel, Platform::Linux)?;

    let windows_raw = extract_version(windows_url)?;
    let linux_raw = extract_version(linux_url)?;
    check_consistency(channel, windows_raw, linux_raw)?;

    let version = normalize_version(windows_raw)?;
    log::debug!("{channel} links resolve to v{version} (raw {windows_raw})");

    let outcome = merge_version(ledger, channel, &version, windows_url, linux_url);
    Ok(ChannelOutcome {
        channel,
        version,
        outcome,
    })
}

/// Run one full pass over both channels.
///
/// The ledger is taken by value and only handed back on success, so a failure
/// in a later channel discards whatever an earlier channel merged.
///
/// # Errors
/// Returns the first error hit while validating or processing a channel.
pub fn process_links(
    links: &RawLinkSet,
    mut ledger: Ledger,
) -> Result<(Ledger, ProcessReport), TrackerError> {
    validate_links(links)?;

    let mut report = ProcessReport::default();
    for channel in Channel::ALL {
        report
            .channels
            .push(process_channel(&mut ledger, links, channel)?);
    }

    Ok((ledger, report))
}
