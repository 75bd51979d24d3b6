use async_trait::async_trait;

use crate::error::{FetchError, PersistError};
use crate::types::{Ledger, RawLinkSet};

/// Where the current set of download links comes from.
#[async_trait]
pub trait LinkSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_links(&self) -> Result<RawLinkSet, FetchError>;
}

/// Durable home of the [`Ledger`].
pub trait LedgerStore: Send + Sync {
    /// Load the stored ledger.
    ///
    /// A missing or unparsable document is logged and yields an empty ledger.
    ///
    /// # Errors
    /// Returns an error if a stored document exists but cannot be read, so
    /// that a later save does not replace records that were never loaded.
    fn load(&self) -> Result<Ledger, PersistError>;

    /// Persist the ledger, replacing whatever was stored before.
    ///
    /// # Errors
    /// Returns an error if the ledger cannot be serialized or written.
    fn save(&self, ledger: &Ledger) -> Result<(), PersistError>;
}
