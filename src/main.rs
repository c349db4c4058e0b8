use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rangecheck::util::install_interrupt_handler;
use rangecheck::{CancelToken, ConfigLoader, RunSummary, StrategyKind};
use tracing_subscriber::EnvFilter;

/// Run every case in each table against the target program.
///
/// Processing `<table>.csv` writes `<table>.results` next to it.
#[derive(Debug, Parser)]
#[command(name = "rangecheck", version, about)]
struct Cli {
    /// Suppress status output.
    #[arg(short, long)]
    quiet: bool,

    /// Execution strategy: direct or wrapped.
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Launcher token for remote/batch execution (implies --strategy wrapped).
    #[arg(long)]
    launcher: Option<String>,

    /// Path to the target program.
    #[arg(long)]
    executable: Option<PathBuf>,

    /// Configuration file (defaults to ./rangecheck.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Test tables to run.
    #[arg(required = true)]
    tables: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> rangecheck::Result<RunSummary> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.config_file(path);
    }

    let mut config = loader.load()?;
    if cli.quiet {
        config.quiet = true;
    }
    if let Some(executable) = cli.executable {
        config.executable = executable;
    }
    if let Some(strategy) = cli.strategy {
        config.execution.strategy = strategy;
    }
    if let Some(launcher) = cli.launcher {
        config.execution.launcher = launcher;
        config.execution.strategy = StrategyKind::Wrapped;
    }

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel)?;

    let harness = rangecheck::builder()
        .with_config(config)
        .cancel_token(cancel)
        .build()?;
    harness.run_tables(&cli.tables)
}
