//! runconf - token/value config files and process run summaries
//!
//! runconf reads simple line-oriented configuration files into a typed
//! lookup table and reports how much time and memory a run used.
//!
//! # Core Features
//!
//! - **Line-Oriented Config**: `token value` or `token=value` lines, `#` comments
//! - **Layered Sources**: later sources override earlier ones, `.zst` files are decompressed
//! - **Dual Values**: every entry keeps its raw text and a best-effort number
//! - **Lenient Extraction**: typed reads warn and fall back instead of failing
//! - **Run Summaries**: start time, running time, CPU time and peak memory
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use runconf::{ConfigStore, RunSummary, SummaryConfig};
//!
//! let summary = RunSummary::start(SummaryConfig::default().with_logfile("run.log"));
//!
//! let mut conf = ConfigStore::new();
//! conf.append_path("defaults.cfg").append_path("run.cfg");
//!
//! let steps: u32 = conf.get_as("steps");
//! let ratio = conf.lookup("ratio").as_float();
//! if !ratio.ok {
//!     eprintln!("falling back to ratio {}", ratio.value);
//! }
//!
//! summary.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod process;

// Re-export commonly used types
pub use crate::core::{
    error::{ConfigError, Result},
    naming::{file_numbering, revision},
};

pub use config::{Coerced, ConfigEntry, ConfigStore, FromEntry};

pub use process::{ProcessSnapshot, RunSummary, SummaryConfig};

/// Current version of runconf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
