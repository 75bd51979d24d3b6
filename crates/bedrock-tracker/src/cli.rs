use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "bedrock-tracker",
    version,
    about = "Record Minecraft Bedrock dedicated server download links"
)]
pub struct Args {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Ledger file, overriding the configured path
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch current links and add new versions to the ledger (default)
    Update {
        /// Process links without writing the ledger
        #[arg(long)]
        dry_run: bool,
    },
    /// Print known versions, newest first
    List {
        /// Only show one channel
        #[arg(long, value_enum)]
        channel: Option<ChannelArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelArg {
    Release,
    Preview,
}

impl From<ChannelArg> for bedrock_model::Channel {
    fn from(value: ChannelArg) -> Self {
        match value {
            ChannelArg::Release => Self::Regular,
            ChannelArg::Preview => Self::Preview,
        }
    }
}
