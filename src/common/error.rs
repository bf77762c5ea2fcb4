use std::path::PathBuf;

use crate::common::money::Money;

/// Rejections raised while building a `Transaction`.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TransactionError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Money),
    #[error("account name must not be empty")]
    EmptyAccount,
    #[error("recipient is required for a transfer")]
    MissingRecipient,
}

/// A line that has the shape of a log entry but cannot become a transaction.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("malformed timestamp {value:?}, expected YYYY-MM-DD HH:MM:SS")]
    Timestamp { value: String },
    #[error("malformed amount {value:?}")]
    Amount { value: String },
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Failure while pulling transactions out of one input stream.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse { line: usize, source: ParseError },
}

/// Domain rule violations. These reject one transaction, never the run.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {account} cannot transfer to itself")]
    SelfTransfer { account: String },
    #[error("account {account}: insufficient funds (requested {requested}, available {available})")]
    InsufficientFunds {
        account: String,
        requested: Money,
        available: Money,
    },
    #[error("inconsistent transaction record: {0}")]
    Inconsistent(String),
}

#[derive(thiserror::Error, Debug)]
pub enum DiscoveryError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to write one account's output file.
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("account name {0:?} cannot be used as a file name")]
    InvalidAccountName(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("write task did not complete: {0}")]
    Task(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to initialize output directory {path}: {source}")]
    Init {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}:{line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        source: ParseError,
    },
    #[error("failed to write {failed} of {total} account files")]
    Write { failed: usize, total: usize },
    #[error("failed to write summary: {0}")]
    Summary(#[from] csv::Error),
}

impl AppError {
    /// Process exit code: 3 for output-directory setup, 4 for everything that goes
    /// wrong while processing the input tree. Usage errors exit with 2 from clap.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Init { .. } => 3,
            _ => 4,
        }
    }
}
