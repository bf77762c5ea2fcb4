use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    common::error::{AppError, DiscoveryError, ReadError},
    domain::{
        ledger::{AccountRegistry, Ledger},
        policy::LedgerPolicy,
    },
    io::reader::read_transactions,
    worker::processor::Processor,
};

/// Folds log files into a ledger, one transaction at a time, in input order.
///
/// I/O and parse failures abort the run; transactions rejected by a domain rule
/// are logged and skipped.
#[derive(Debug, Default)]
pub struct Aggregator {
    ledger: Ledger,
    processor: Processor,
    files: usize,
}

impl Aggregator {
    pub fn new(policy: LedgerPolicy) -> Self {
        Self {
            ledger: Ledger::with_policy(policy),
            processor: Processor::new(),
            files: 0,
        }
    }

    pub fn process_file(&mut self, path: &Path) -> Result<(), AppError> {
        let file = File::open(path).map_err(|source| AppError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "processing file");
        self.process_reader(path, BufReader::new(file))?;
        self.files += 1;
        Ok(())
    }

    /// `source` names the stream in errors and log records.
    pub fn process_reader<R: BufRead>(&mut self, source: &Path, reader: R) -> Result<(), AppError> {
        for event in read_transactions(reader) {
            let event = event.map_err(|e| match e {
                ReadError::Io(err) => AppError::ReadInput {
                    path: source.to_path_buf(),
                    source: err,
                },
                ReadError::Parse { line, source: err } => AppError::Parse {
                    path: source.to_path_buf(),
                    line,
                    source: err,
                },
            })?;
            let line = event.line;
            if let Err(e) = self.processor.process(&mut self.ledger, event) {
                warn!(
                    file = %source.display(),
                    line,
                    error = %e,
                    "transaction rejected"
                );
            }
        }
        Ok(())
    }

    /// Ends the run and hands out the read-only registry.
    pub fn finish(self) -> AccountRegistry {
        info!(
            files = self.files,
            accounts = self.ledger.accounts().len(),
            applied = self.processor.applied(),
            rejected = self.processor.rejected(),
            "aggregation finished"
        );
        self.ledger.freeze()
    }
}

/// Aggregates every file of `paths` into a registry. The first discovery, read
/// or parse failure aborts the whole run.
pub fn aggregate<I>(paths: I, policy: LedgerPolicy) -> Result<AccountRegistry, AppError>
where
    I: IntoIterator<Item = Result<PathBuf, DiscoveryError>>,
{
    let mut aggregator = Aggregator::new(policy);
    for path in paths {
        aggregator.process_file(&path?)?;
    }
    Ok(aggregator.finish())
}
