mod cli;
mod commands;
mod logging;
mod settings;

use std::process::ExitCode;

use bedrock_platform::AppPaths;
use clap::Parser;

use crate::cli::{Args, Command};
use crate::settings::TrackerSettings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut settings = TrackerSettings::load(args.config.as_deref());
    if let Some(ledger) = args.ledger {
        settings.ledger_path = ledger;
    }
    settings.debug_logging |= args.debug;

    let log_path = AppPaths::new()
        .ok()
        .filter(|paths| paths.ensure_dirs().is_ok())
        .map(|paths| paths.log_file());
    logging::init_logging(
        settings.debug_logging,
        log_path.as_deref(),
        settings.max_log_size_bytes,
    );

    let output = match args.command.unwrap_or(Command::Update { dry_run: false }) {
        Command::Update { dry_run } => commands::update(&settings, dry_run)
            .await
            .map(|report| commands::summarize(&report)),
        Command::List { channel } => commands::list(&settings, channel.map(Into::into)),
    };

    match output {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
