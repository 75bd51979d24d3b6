//! Tracking logic for Bedrock dedicated server downloads.
//!
//! This crate turns a set of published download links into ledger updates:
//! - Version extraction and normalization from archive file names.
//! - Cross-platform consistency checks per channel.
//! - Additive merging into the [`Ledger`](bedrock_model::Ledger).
//! - The links API client and the JSON ledger store.

mod consistency;
mod extract;
mod fetch;
mod listing;
mod merge;
mod orchestrator;
mod refresh;
mod store;

/// Raw-version equality check between platform links.
pub use consistency::check_consistency;
/// Archive-name version extraction and normalization.
pub use extract::{extract_version, normalize_version};
/// Links API client and payload model.
pub use fetch::{
    BROWSER_USER_AGENT, DOWNLOAD_LINKS_URL, DownloadLinksClient, FetchOptions,
    parse_links_response,
};
/// Version ordering for display.
pub use listing::{latest_version, sorted_versions};
pub use merge::merge_version;
/// Per-channel pipeline and whole-run orchestration.
pub use orchestrator::{
    ChannelOutcome, ProcessReport, process_channel, process_links, validate_links,
};
pub use refresh::{SaveMode, refresh};
/// Ledger persistence backends.
pub use store::{JsonFileLedgerStore, MemoryLedgerStore};
