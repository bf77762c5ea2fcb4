use std::io::{BufWriter, stdout};

use tracing::info;

use crate::{
    common::error::AppError,
    config::Config,
    domain::ledger::AccountRegistry,
    io::{discovery::LogFiles, summary::write_summary, writer::LogWriter},
    worker::aggregator::aggregate,
};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub accounts: usize,
    pub output_dir: std::path::PathBuf,
}

/// Discovers the input files, folds them into per-account ledgers and writes
/// one file per account.
pub async fn run(config: Config) -> Result<RunSummary, AppError> {
    let files = LogFiles::new(&config.input_dir, config.extension.as_str())?
        .excluding(config.writer.output_dir.clone());
    let writer = LogWriter::new(config.writer.clone())?;
    info!(
        input = %config.input_dir.display(),
        output = %writer.config().output_dir.display(),
        "starting aggregation"
    );

    let registry: AccountRegistry = aggregate(files, config.policy)?;
    let report = writer.write_all(&registry).await;
    let written = report.into_result()?;
    info!(files = written.len(), "account files written");

    if config.summary {
        let out = stdout();
        write_summary(BufWriter::new(out.lock()), &registry, config.writer.balance_scale)?;
    }

    Ok(RunSummary {
        accounts: registry.len(),
        output_dir: config.writer.output_dir,
    })
}
