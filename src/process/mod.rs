//! Process resource reporting
//!
//! Thin wrappers over OS queries (wall clock, `getrusage`, `/proc`) plus the
//! [`RunSummary`] that turns them into an end-of-run log.

pub mod stats;
pub mod summary;
pub mod watcher;

// Re-export commonly used items
pub use stats::{
    memory_mb, system_cpu_secs, user_cpu_secs, wall_time_hr, wall_time_secs, CpuTimes,
    ProcessSnapshot,
};
pub use summary::{RunSummary, SummaryConfig, SummaryReport};
pub use watcher::MemoryWatcher;
