use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use vtsweep::cli::Args;
use vtsweep::config::Config;
use vtsweep::runner::{RetryConfig, Runner, RunnerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "vtsweep=debug"
    } else {
        "vtsweep=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path().context("cannot locate a home directory")?,
    };

    if args.create_config {
        Config::write_skeleton(&config_path)?;
        eprintln!(
            "[*] An empty {} has been created. Please edit and fill in the correct values.",
            config_path.display()
        );
        return Ok(());
    }

    let batch = args.batch();
    if batch.is_empty() {
        Args::command().print_help()?;
        return Ok(());
    }

    let mut config = Config::load(&config_path)?;
    if args.proxy.is_some() {
        config.proxy = args.proxy.clone();
    }

    let runner_config = RunnerConfig::default()
        .with_retry(RetryConfig::default().with_max_attempts(args.attempts))
        .with_pause(Duration::from_secs(config.pause_secs))
        .with_format(args.output);

    let runner = Runner::from_config(&config, runner_config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.run(batch, &mut out).await?;

    Ok(())
}
