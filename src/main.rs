use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use txlog_aggregator::{
    app,
    config::{Cli, Config},
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // exits with status 2 on a missing or malformed argument
    let config = Config::from(Cli::parse());
    let summary_on_stdout = config.summary;

    match app::run(config).await {
        Ok(outcome) => {
            let status = format!(
                "Logs processed successfully: {} accounts written to {}",
                outcome.accounts,
                outcome.output_dir.display()
            );
            // stdout carries the CSV summary when one was asked for
            if summary_on_stdout {
                eprintln!("{status}");
            } else {
                println!("{status}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
