use bedrock_model::{Channel, Ledger, MergeOutcome, ServerVersion, VersionRecord};

/// Record a version in its channel section unless it is already known.
///
/// Existing records are left exactly as they are, even when the upstream URLs
/// for that version have since changed.
pub fn merge_version(
    ledger: &mut Ledger,
    channel: Channel,
    version: &ServerVersion,
    windows_url: &str,
    linux_url: &str,
) -> MergeOutcome {
    let key = version.to_string();
    let section = ledger.section_mut(channel);

    if section.contains_key(&key) {
        log::info!("{channel} version v{key} is already up to date.");
        return MergeOutcome::AlreadyKnown;
    }

    log::info!("Adding new {channel} version v{key} to database.");
    section.insert(key, VersionRecord::new(windows_url, linux_url));
    MergeOutcome::Added
}
