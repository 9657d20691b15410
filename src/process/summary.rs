//! End-of-run summary: start time, running time, CPU time and peak memory
//!
//! A [`RunSummary`] is created at program start and finished at shutdown.
//! Finishing writes a short report to the configured logfile, or to stderr
//! when none is set. If `finish` is never called the report is written on
//! drop instead, exactly once either way.

use crate::config::{open_writable, ConfigStore};
use crate::core::error::{ConfigError, Result};
use crate::core::naming::revision;
use crate::process::stats::{self, format_hr, wall_time_hr};
use crate::process::watcher::MemoryWatcher;
use chrono::Local;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Config token naming the logfile
pub const LOGFILE_TOKEN: &str = "logfile";
/// Config token enabling or disabling the summary (numeric bool)
pub const WRITE_LOGFILE_TOKEN: &str = "write_logfile";
/// Config token giving the memory sampling interval in milliseconds
pub const SAMPLE_MS_TOKEN: &str = "memory_sample_ms";

/// Settings of a [`RunSummary`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Where to write the summary; stderr if `None`
    pub logfile: Option<PathBuf>,
    /// Whether to write the summary at all
    pub write_logfile: bool,
    /// Sample memory in the background at this interval
    pub sample_interval: Option<Duration>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            logfile: None,
            write_logfile: true,
            sample_interval: None,
        }
    }
}

impl SummaryConfig {
    /// Read settings from a config store, keeping defaults for absent tokens.
    ///
    /// Uses pure lookups, so the store is not modified.
    pub fn from_store(store: &ConfigStore) -> Self {
        let mut config = Self::default();
        if let Some(entry) = store.get(LOGFILE_TOKEN).filter(|e| !e.is_empty()) {
            config.logfile = Some(PathBuf::from(entry.text()));
        }
        if let Some(entry) = store.get(WRITE_LOGFILE_TOKEN) {
            config.write_logfile = entry.as_bool().value;
        }
        if let Some(entry) = store.get(SAMPLE_MS_TOKEN) {
            let millis = entry.as_uint().value;
            if millis > 0 {
                config.sample_interval = Some(Duration::from_millis(u64::from(millis)));
            }
        }
        config
    }

    pub fn with_logfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.logfile = Some(path.into());
        self
    }

    pub fn with_write_logfile(mut self, write: bool) -> Self {
        self.write_logfile = write;
        self
    }

    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = Some(interval);
        self
    }
}

/// The fields of a written summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    /// Only set for snapshots written by [`RunSummary::put_log_data`]
    pub revision: Option<String>,
    pub started_at: String,
    pub running_secs: u64,
    pub cpu_secs: u64,
    pub memory_mb: u64,
    pub closing_label: &'static str,
    pub closed_at: String,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(revision) = &self.revision {
            writeln!(f, "Revision: {}", revision)?;
        }
        writeln!(f, "Started at: {}", self.started_at)?;
        writeln!(f, "Running time: {} seconds", self.running_secs)?;
        writeln!(f, "CPU time: {} seconds", self.cpu_secs)?;
        writeln!(f, "Memory usage: {} MegaBytes", self.memory_mb)?;
        writeln!(f, "{}: {}", self.closing_label, self.closed_at)
    }
}

/// Tracks a program run and reports on it when finished
#[derive(Debug)]
pub struct RunSummary {
    start_time: u64,
    start_time_hr: String,
    started: Instant,
    max_memory_mb: AtomicU64,
    config: SummaryConfig,
    watcher: Option<MemoryWatcher>,
    written: bool,
}

impl RunSummary {
    /// Record the start of a run
    pub fn start(config: SummaryConfig) -> Self {
        let watcher = config
            .sample_interval
            .and_then(|interval| match MemoryWatcher::spawn(interval) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    ConfigError::Io(e).warn("RunSummary::start");
                    None
                },
            });

        Self {
            start_time: stats::wall_time_secs(),
            start_time_hr: format_hr(&Local::now()),
            started: Instant::now(),
            max_memory_mb: AtomicU64::new(stats::memory_mb()),
            config,
            watcher,
            written: false,
        }
    }

    /// Start time in seconds since the Unix epoch
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn start_time_hr(&self) -> &str {
        &self.start_time_hr
    }

    /// Wall time elapsed since start
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn logfile(&self) -> Option<&Path> {
        self.acquire_max_memory();
        self.config.logfile.as_deref()
    }

    /// Change where the summary goes; `None` means stderr
    pub fn set_logfile(&mut self, path: Option<PathBuf>) {
        self.config.logfile = path;
        self.acquire_max_memory();
    }

    pub fn write_logfile(&self) -> bool {
        self.acquire_max_memory();
        self.config.write_logfile
    }

    pub fn set_write_logfile(&mut self, write: bool) {
        self.config.write_logfile = write;
        self.acquire_max_memory();
    }

    /// Fold the current memory reading into the maximum
    pub fn acquire_max_memory(&self) {
        self.record_memory(stats::memory_mb());
    }

    fn record_memory(&self, mb: u64) {
        self.max_memory_mb.fetch_max(mb, Ordering::Relaxed);
    }

    /// Highest memory use seen so far, in megabytes
    pub fn max_memory_mb(&self) -> u64 {
        self.acquire_max_memory();
        if let Some(watcher) = &self.watcher {
            self.record_memory(watcher.peak_mb());
        }
        self.max_memory_mb.load(Ordering::Relaxed)
    }

    fn cpu_secs() -> u64 {
        match stats::try_cpu_times() {
            Ok(times) => times.total().as_secs(),
            Err(err) => {
                err.warn("RunSummary::report");
                0
            },
        }
    }

    /// The summary as it would be written now
    pub fn report(&self) -> SummaryReport {
        SummaryReport {
            revision: None,
            started_at: self.start_time_hr.clone(),
            running_secs: self.elapsed().as_secs(),
            cpu_secs: Self::cpu_secs(),
            memory_mb: self.max_memory_mb(),
            closing_label: "Ended at",
            closed_at: wall_time_hr(),
        }
    }

    /// Write an immediate snapshot (with the build revision) to `path`
    pub fn try_put_log_data(&self, path: impl AsRef<Path>) -> Result<()> {
        let report = SummaryReport {
            revision: Some(revision().to_string()),
            started_at: self.start_time_hr.clone(),
            running_secs: self.elapsed().as_secs(),
            cpu_secs: Self::cpu_secs(),
            memory_mb: stats::memory_mb(),
            closing_label: "Logged at",
            closed_at: wall_time_hr(),
        };
        write_to_path(path.as_ref(), &report)
    }

    /// Like [`RunSummary::try_put_log_data`], but only warns on failure
    pub fn put_log_data(&self, path: impl AsRef<Path>) {
        if let Err(err) = self.try_put_log_data(path) {
            err.warn("RunSummary::put_log_data");
        }
    }

    /// Stop sampling and write the summary, if enabled
    pub fn finish(mut self) -> Result<()> {
        self.finalize()
    }

    fn finalize(&mut self) -> Result<()> {
        if self.written {
            return Ok(());
        }
        self.written = true;

        if let Some(watcher) = self.watcher.take() {
            self.record_memory(watcher.stop());
        }
        if !self.config.write_logfile {
            return Ok(());
        }

        let report = self.report();
        match &self.config.logfile {
            Some(path) => write_to_path(path, &report),
            None => write_report(&mut io::stderr().lock(), &report)
                .map_err(|source| ConfigError::LogWrite {
                    path: PathBuf::from("<stderr>"),
                    source,
                }),
        }
    }
}

impl Drop for RunSummary {
    fn drop(&mut self) {
        if let Err(err) = self.finalize() {
            err.warn("RunSummary::drop");
        }
    }
}

fn write_report(sink: &mut dyn Write, report: &SummaryReport) -> io::Result<()> {
    write!(sink, "{}", report)?;
    sink.flush()
}

fn write_to_path(path: &Path, report: &SummaryReport) -> Result<()> {
    let mut sink = open_writable(path)?;
    write_report(&mut sink, report).map_err(|source| ConfigError::LogWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_report_format() {
        let report = SummaryReport {
            revision: None,
            started_at: "Mon Oct 19 10:00:00 2026".into(),
            running_secs: 12,
            cpu_secs: 3,
            memory_mb: 48,
            closing_label: "Ended at",
            closed_at: "Mon Oct 19 10:00:12 2026".into(),
        };
        assert_eq!(
            report.to_string(),
            "Started at: Mon Oct 19 10:00:00 2026\n\
             Running time: 12 seconds\n\
             CPU time: 3 seconds\n\
             Memory usage: 48 MegaBytes\n\
             Ended at: Mon Oct 19 10:00:12 2026\n"
        );
    }

    #[test]
    fn test_config_from_store() {
        let store: ConfigStore = "logfile run.log\nwrite_logfile 0\nmemory_sample_ms 250"
            .parse()
            .unwrap();
        let config = SummaryConfig::from_store(&store);
        assert_eq!(config.logfile, Some(PathBuf::from("run.log")));
        assert!(!config.write_logfile);
        assert_eq!(config.sample_interval, Some(Duration::from_millis(250)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_config_from_empty_store_is_default() {
        let config = SummaryConfig::from_store(&ConfigStore::new());
        assert_eq!(config, SummaryConfig::default());
    }

    #[test]
    fn test_finish_writes_logfile() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("summary.log");

        let summary = RunSummary::start(SummaryConfig::default().with_logfile(&path));
        assert_eq!(summary.logfile(), Some(path.as_path()));
        summary.finish()?;

        let content = fs::read_to_string(&path)?;
        let labels: Vec<&str> = content
            .lines()
            .map(|line| line.split(':').next().unwrap_or(""))
            .collect();
        assert_eq!(
            labels,
            vec!["Started at", "Running time", "CPU time", "Memory usage", "Ended at"]
        );
        Ok(())
    }

    #[test]
    fn test_drop_writes_once() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("dropped.log");
        {
            let _summary = RunSummary::start(SummaryConfig::default().with_logfile(&path));
        }
        assert!(fs::read_to_string(&path)?.starts_with("Started at: "));
        Ok(())
    }

    #[test]
    fn test_disabled_summary_writes_nothing() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("never.log");

        let mut summary = RunSummary::start(SummaryConfig::default().with_logfile(&path));
        summary.set_write_logfile(false);
        assert!(!summary.write_logfile());
        summary.finish()?;

        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_unwritable_logfile_is_reported() {
        let summary = RunSummary::start(
            SummaryConfig::default().with_logfile("/nonexistent-dir/run/summary.log"),
        );
        assert!(summary.finish().is_err());
    }

    #[test]
    fn test_put_log_data_snapshot() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("snapshot.log");

        let summary = RunSummary::start(SummaryConfig::default().with_write_logfile(false));
        summary.try_put_log_data(&path)?;

        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with(&format!("Revision: {}\n", revision())));
        assert!(content.lines().last().unwrap_or("").starts_with("Logged at: "));
        Ok(())
    }

    #[test]
    fn test_sampling_summary_tracks_peak() -> anyhow::Result<()> {
        let summary = RunSummary::start(
            SummaryConfig::default()
                .with_write_logfile(false)
                .with_sample_interval(Duration::from_millis(1)),
        );
        let before = summary.max_memory_mb();
        assert!(summary.max_memory_mb() >= before);
        summary.finish()?;
        Ok(())
    }
}
