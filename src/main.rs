//! runconf CLI
//!
//! Command-line interface for reading token/value config files.

use anyhow::Result;
use clap::Parser;
use runconf::cli::{commands, Cli, Commands};
use runconf::config::ConfigStore;
use runconf::process::{RunSummary, SummaryConfig};
use std::io::IsTerminal;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    let summary = RunSummary::start(summary_config(&cli));

    let result = match cli.command {
        Commands::Get {
            token,
            files,
            kind,
            strict,
        } => commands::get::execute(token, files, kind, strict),
        Commands::List { files, json } => commands::list::execute(files, json),
        Commands::Stats { json } => commands::stats::execute(json, Some(&summary)),
    };

    if let Err(err) = summary.finish() {
        err.warn("main");
    }
    result
}

/// Summary settings: config file first, then command-line overrides
fn summary_config(cli: &Cli) -> SummaryConfig {
    let mut config = match &cli.summary_config {
        Some(path) => SummaryConfig::from_store(&ConfigStore::from_path(path)),
        None => SummaryConfig::default(),
    };
    if let Some(logfile) = &cli.logfile {
        config.logfile = Some(logfile.clone());
    }
    if cli.no_summary {
        config.write_logfile = false;
    }
    config
}
