use std::{
    collections::HashMap,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{Local, NaiveDateTime};
use tokio::{
    sync::Semaphore,
    task::{self, JoinSet},
};
use tracing::{debug, warn};

use crate::{
    common::error::{AppError, WriteError},
    domain::{account::Account, ledger::AccountRegistry, transaction::TIMESTAMP_FORMAT},
};

pub const DEFAULT_BALANCE_SCALE: u32 = 2;

/// Where and how account files are written.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub output_dir: PathBuf,
    /// Output file extension, without the dot.
    pub extension: String,
    /// Upper bound on files written at the same time.
    pub parallelism: NonZeroUsize,
    /// Decimal places of the final balance line.
    pub balance_scale: u32,
}

impl WriterConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: "log".to_owned(),
            parallelism: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            balance_scale: DEFAULT_BALANCE_SCALE,
        }
    }
}

/// Outcome of a fan-out write: every file written and every account that failed.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(String, WriteError)>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    pub fn into_result(self) -> Result<Vec<PathBuf>, AppError> {
        if self.failures.is_empty() {
            Ok(self.written)
        } else {
            Err(AppError::Write {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Writes one file per account into an output directory that exists by construction.
#[derive(Debug, Clone)]
pub struct LogWriter {
    config: WriterConfig,
}

impl LogWriter {
    /// Creates the output directory (and missing parents) once, up front.
    pub fn new(config: WriterConfig) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.output_dir).map_err(|source| AppError::Init {
            path: config.output_dir.clone(),
            source,
        })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Writes every account of the registry, at most `parallelism` at a time.
    ///
    /// A failure for one account does not stop the others; all outcomes are
    /// collected in the returned report.
    pub async fn write_all(&self, registry: &AccountRegistry) -> WriteReport {
        let config = Arc::new(self.config.clone());
        self.fan_out(registry, move |account| {
            let config = Arc::clone(&config);
            async move { write_account(&config, &account).await }
        })
        .await
    }

    /// Runs `write` once per account on its own task, gated by the semaphore.
    /// Every outcome, including a panicked task, is reported under its account name.
    async fn fan_out<F, Fut>(&self, registry: &AccountRegistry, write: F) -> WriteReport
    where
        F: Fn(Arc<Account>) -> Fut,
        Fut: Future<Output = Result<PathBuf, WriteError>> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.config.parallelism.get()));
        let mut tasks = JoinSet::new();
        let mut names: HashMap<task::Id, String> = HashMap::new();

        for account in registry.iter() {
            let name = account.name().to_owned();
            let job = write(Arc::clone(account));
            let permits = Arc::clone(&permits);
            let handle = tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| WriteError::Task(e.to_string()))?;
                job.await
            });
            names.insert(handle.id(), name);
        }

        let mut report = WriteReport::default();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (e.id(), Err(WriteError::Task(e.to_string()))),
            };
            let name = names.remove(&id).unwrap_or_default();
            match result {
                Ok(path) => {
                    debug!(path = %path.display(), "account file written");
                    report.written.push(path);
                }
                Err(e) => {
                    warn!(account = %name, error = %e, "failed to write account file");
                    report.failures.push((name, e));
                }
            }
        }
        report.written.sort();
        report.failures.sort_by(|a, b| a.0.cmp(&b.0));
        report
    }
}

async fn write_account(config: &WriterConfig, account: &Account) -> Result<PathBuf, WriteError> {
    let path = account_path(&config.output_dir, account.name(), &config.extension)?;
    let now = Local::now().naive_local();
    let contents = render_account(account, now, config.balance_scale);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// `<dir>/<account>.<ext>`, refusing names that would leave `dir`.
pub fn account_path(dir: &Path, account: &str, extension: &str) -> Result<PathBuf, WriteError> {
    let invalid = account.is_empty()
        || account == "."
        || account == ".."
        || account.contains(['/', '\\', '\0']);
    if invalid {
        return Err(WriteError::InvalidAccountName(account.to_owned()));
    }
    Ok(dir.join(format!("{account}.{extension}")))
}

/// The full contents of an account file: the history in timestamp order, then
/// the final balance stamped with `now`.
pub fn render_account(account: &Account, now: NaiveDateTime, balance_scale: u32) -> String {
    let mut lines: Vec<String> = account.history().map(ToString::to_string).collect();
    lines.push(format!(
        "[{}] {} final balance {}",
        now.format(TIMESTAMP_FORMAT),
        account.name(),
        account.balance().to_string_scaled(balance_scale)
    ));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
