use std::fmt::Write as _;

use bedrock_core::{
    DownloadLinksClient, JsonFileLedgerStore, ProcessReport, SaveMode, latest_version, refresh,
    sorted_versions,
};
use bedrock_model::{Channel, Ledger, LedgerStore, MergeOutcome, Platform, TrackerError};

use crate::settings::TrackerSettings;

pub async fn update(
    settings: &TrackerSettings,
    dry_run: bool,
) -> Result<ProcessReport, TrackerError> {
    let source = DownloadLinksClient::new(&settings.fetch_options())?;
    let store = JsonFileLedgerStore::new(&settings.ledger_path);
    let mode = if dry_run {
        SaveMode::DryRun
    } else {
        SaveMode::Persist
    };

    log::info!("Processing Minecraft Bedrock Server versions...");
    let report = refresh(&source, &store, mode).await?;
    log::info!("All versions processed successfully.");
    Ok(report)
}

pub fn summarize(report: &ProcessReport) -> String {
    let mut out = String::new();
    for entry in &report.channels {
        let state = match entry.outcome {
            MergeOutcome::Added => "added",
            MergeOutcome::AlreadyKnown => "already known",
        };
        let _ = writeln!(
            out,
            "{:<8} {:<12} {state}",
            entry.channel.to_string(),
            format!("v{}", entry.version)
        );
    }
    out
}

pub fn list(settings: &TrackerSettings, channel: Option<Channel>) -> Result<String, TrackerError> {
    let ledger = JsonFileLedgerStore::new(&settings.ledger_path).load()?;
    Ok(render_ledger(&ledger, channel))
}

fn render_ledger(ledger: &Ledger, only: Option<Channel>) -> String {
    let mut out = String::new();
    for channel in Channel::ALL {
        if only.is_some_and(|only| only != channel) {
            continue;
        }
        let _ = writeln!(out, "{}:", channel.section_name());
        let Some(latest) = latest_version(ledger, channel) else {
            let _ = writeln!(out, "  (none)");
            continue;
        };
        let _ = writeln!(out, "  latest: {latest}");
        for (version, record) in sorted_versions(ledger, channel) {
            let _ = writeln!(out, "  {version}");
            for platform in [Platform::Windows, Platform::Linux] {
                let label = format!("{platform}:");
                let _ = writeln!(out, "    {label:<9}{}", record.link(platform).url);
            }
        }
    }
    out
}
