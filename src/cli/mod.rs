//! Command-line interface for runconf

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// runconf - read token/value config files and report process resources
#[derive(Parser)]
#[command(
    name = "runconf",
    version,
    about = "Read token/value config files with typed lookups",
    long_about = "runconf merges line-oriented `token value` config files, looks tokens up as text, numbers, bools or chars, and writes an end-of-run resource summary."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write the run summary to this file instead of stderr
    #[arg(long, global = true, env = "RUNCONF_LOGFILE")]
    pub logfile: Option<PathBuf>,

    /// Read summary settings (logfile, write_logfile, memory_sample_ms) from this config file
    #[arg(long, global = true)]
    pub summary_config: Option<PathBuf>,

    /// Do not write a run summary
    #[arg(long, global = true)]
    pub no_summary: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up one token in the merged content of config files
    Get {
        /// Token to look up
        token: String,

        /// Config files, later ones override earlier ones (`-` for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Interpret the value as this type
        #[arg(long = "as", value_enum, default_value = "string")]
        kind: ValueKind,

        /// Fail instead of warning when the token is missing or does not convert
        #[arg(long)]
        strict: bool,
    },

    /// List all tokens of the merged content of config files
    List {
        /// Config files, later ones override earlier ones (`-` for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show current process statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Target type of a `get` lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Float,
    Double,
    Int,
    Uint,
    Bool,
    Char,
}
