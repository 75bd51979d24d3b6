use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Cut an oversized log down to its newest `max_log_size / 2` bytes, starting
/// at a line boundary.
fn trim_log_file_if_oversized(log_path: &Path, max_log_size: u64) {
    let Ok(metadata) = std::fs::metadata(log_path) else {
        return;
    };
    if metadata.len() <= max_log_size {
        return;
    }
    let Ok(contents) = std::fs::read(log_path) else {
        return;
    };

    let budget = usize::try_from(max_log_size / 2).unwrap_or(usize::MAX);
    let cut = contents.len().saturating_sub(budget);
    let keep_from = contents[cut..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(contents.len(), |pos| cut + pos + 1);
    let _ = std::fs::write(log_path, &contents[keep_from..]);
}

fn open_log_file(log_path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(log_path)
}

fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn tracker_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("bedrock")
        .build()
}

/// Terminal logger at `level`, plus a debug-level file logger when the log
/// file can be opened. The file always records debug so that a failed run
/// can be diagnosed after the fact.
fn build_loggers(
    level: LevelFilter,
    log_path: Option<&Path>,
    max_log_size: u64,
) -> Vec<Box<dyn SharedLogger>> {
    let config = tracker_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(log_path) = log_path {
        trim_log_file_if_oversized(log_path, max_log_size);
        match open_log_file(log_path) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, config, file)),
            Err(error) => eprintln!("Log file {} unavailable: {error}", log_path.display()),
        }
    }

    loggers
}

/// Log to stderr and, when a log path is available, append to that file too.
pub fn init_logging(debug_enabled: bool, log_path: Option<&Path>, max_log_size: u64) {
    let level = level_for(debug_enabled);
    let loggers = build_loggers(level, log_path, max_log_size);
    let file_logging = loggers.len() > 1;

    let _ = CombinedLogger::init(loggers);
    log::set_max_level(LevelFilter::Debug);

    log::debug!("Logging initialized at {level} (file logging: {file_logging})");
}
