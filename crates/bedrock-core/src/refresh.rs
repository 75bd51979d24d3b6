use bedrock_model::{LedgerStore, LinkSource, TrackerError};

use crate::orchestrator::{ProcessReport, process_links};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveMode {
    #[default]
    Persist,
    DryRun,
}

/// One tracking run: load the ledger, fetch links, merge, then save.
///
/// The ledger is written at most once, and only after both channels were
/// processed without error.
///
/// # Errors
/// Returns the fetch, validation, extraction, consistency, format or persist
/// error that ended the run.
pub async fn refresh<S, L>(
    source: &S,
    store: &L,
    mode: SaveMode,
) -> Result<ProcessReport, TrackerError>
where
    S: LinkSource + ?Sized,
    L: LedgerStore + ?Sized,
{
    let ledger = store.load()?;
    log::debug!("Loaded ledger with {} known versions", ledger.len());

    log::debug!("Fetching download links from {}", source.name());
    let links = source.fetch_links().await?;
    let (ledger, report) = process_links(&links, ledger)?;

    match mode {
        SaveMode::Persist => store.save(&ledger)?,
        SaveMode::DryRun => log::info!("Dry run, ledger not saved"),
    }

    Ok(report)
}
