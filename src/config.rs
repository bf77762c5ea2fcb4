use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;

use crate::{
    domain::policy::LedgerPolicy,
    io::writer::{DEFAULT_BALANCE_SCALE, WriterConfig},
};

pub const DEFAULT_OUTPUT_DIR: &str = "transactions_by_users";
pub const DEFAULT_EXTENSION: &str = "log";

#[derive(Parser, Debug)]
#[command(author, version, about = "Rebuilds per-account ledgers from a tree of transaction logs", long_about = None)]
pub struct Cli {
    /// Directory searched recursively for log files
    pub input_dir: PathBuf,

    /// Output subdirectory, resolved against the input directory
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Extension of the log files to read and write
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Maximum number of account files written concurrently [default: available cores]
    #[arg(long)]
    pub jobs: Option<NonZeroUsize>,

    /// Decimal places of the final balance line
    #[arg(long, default_value_t = DEFAULT_BALANCE_SCALE)]
    pub balance_scale: u32,

    /// Reject withdrawals and transfers that would take a balance below zero
    #[arg(long)]
    pub forbid_negative_balance: bool,

    /// Accept transfers to the sending account as no-ops
    #[arg(long)]
    pub allow_self_transfer: bool,

    /// Also record transfers in the recipient's history
    #[arg(long)]
    pub record_recipient_history: bool,

    /// Print a CSV balance summary to stdout
    #[arg(long)]
    pub summary: bool,
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub extension: String,
    pub policy: LedgerPolicy,
    pub writer: WriterConfig,
    pub summary: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mut writer = WriterConfig::new(cli.input_dir.join(&cli.output_dir));
        writer.extension = cli.extension.clone();
        writer.balance_scale = cli.balance_scale;
        if let Some(jobs) = cli.jobs {
            writer.parallelism = jobs;
        }

        Self {
            policy: LedgerPolicy {
                allow_negative_balance: !cli.forbid_negative_balance,
                allow_self_transfer: cli.allow_self_transfer,
                record_transfer_for_recipient: cli.record_recipient_history,
            },
            input_dir: cli.input_dir,
            extension: cli.extension,
            writer,
            summary: cli.summary,
        }
    }
}
