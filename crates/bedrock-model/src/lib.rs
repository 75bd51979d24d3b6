mod error;
mod traits;
mod types;

pub use error::{ExtractionError, FetchError, PersistError, TrackerError};
pub use traits::{LedgerStore, LinkSource};
pub use types::{
    Channel, Ledger, LedgerSection, LinkCategory, MergeOutcome, Platform, PlatformLink,
    RawLinkSet, ServerVersion, VersionParseError, VersionRecord,
};
