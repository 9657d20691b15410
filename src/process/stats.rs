//! Process statistics: wall time, CPU time and memory use
//!
//! The `try_*` functions report failures; the plain ones log a warning and
//! fall back to zero (or an empty string), which is what run summaries want.

use crate::core::error::{ConfigError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// CPU time used by this process so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: Duration,
    pub system: Duration,
}

impl CpuTimes {
    pub fn total(&self) -> Duration {
        self.user + self.system
    }
}

/// Seconds since the Unix epoch
pub fn try_wall_time_secs() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| ConfigError::process_stat("wall time", e))
}

pub fn wall_time_secs() -> u64 {
    try_wall_time_secs().unwrap_or_else(|err| {
        err.warn("wall_time_secs");
        0
    })
}

/// Current local time in `ctime` layout, e.g. `Mon Oct 19 14:03:07 2026`
pub fn wall_time_hr() -> String {
    format_hr(&Local::now())
}

pub(crate) fn format_hr(time: &DateTime<Local>) -> String {
    time.format("%a %b %e %H:%M:%S %Y").to_string()
}

#[cfg(unix)]
fn rusage() -> Result<libc::rusage> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: getrusage only writes into the provided struct.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return Err(ConfigError::process_stat(
            "resource usage",
            std::io::Error::last_os_error(),
        ));
    }
    // SAFETY: getrusage succeeded and filled the struct.
    Ok(unsafe { usage.assume_init() })
}

#[cfg(unix)]
fn timeval_duration(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec.max(0) as u64)
        + Duration::from_micros(tv.tv_usec.max(0) as u64)
}

/// User and system CPU time of this process
#[cfg(unix)]
pub fn try_cpu_times() -> Result<CpuTimes> {
    let usage = rusage()?;
    Ok(CpuTimes {
        user: timeval_duration(usage.ru_utime),
        system: timeval_duration(usage.ru_stime),
    })
}

#[cfg(not(unix))]
pub fn try_cpu_times() -> Result<CpuTimes> {
    Err(ConfigError::process_stat(
        "resource usage",
        "not supported on this platform",
    ))
}

fn cpu_times_or_zero(operation: &'static str) -> CpuTimes {
    try_cpu_times().unwrap_or_else(|err| {
        err.warn(operation);
        CpuTimes::default()
    })
}

/// Whole seconds of user CPU time used so far
pub fn user_cpu_secs() -> u64 {
    cpu_times_or_zero("user_cpu_secs").user.as_secs()
}

/// Whole seconds of system CPU time used so far
pub fn system_cpu_secs() -> u64 {
    cpu_times_or_zero("system_cpu_secs").system.as_secs()
}

/// Resident page count from the content of `/proc/<pid>/statm`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_statm_resident(content: &str) -> Option<u64> {
    content.split_whitespace().nth(1)?.parse().ok()
}

/// Resident memory of this process in bytes
#[cfg(target_os = "linux")]
pub fn try_memory_bytes() -> Result<u64> {
    let content = std::fs::read_to_string("/proc/self/statm")
        .map_err(|e| ConfigError::process_stat("memory", e))?;
    let pages = parse_statm_resident(&content)
        .ok_or_else(|| ConfigError::process_stat("memory", "malformed /proc/self/statm"))?;
    // SAFETY: sysconf has no memory side effects.
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if page_size <= 0 {
        return Err(ConfigError::process_stat("memory", "unknown page size"));
    }
    Ok(pages * page_size as u64)
}

/// Peak resident memory of this process in bytes (no current reading here)
#[cfg(all(unix, not(target_os = "linux")))]
pub fn try_memory_bytes() -> Result<u64> {
    let max_rss = rusage()?.ru_maxrss.max(0) as u64;
    if cfg!(target_os = "macos") {
        Ok(max_rss)
    } else {
        Ok(max_rss * 1024)
    }
}

#[cfg(not(unix))]
pub fn try_memory_bytes() -> Result<u64> {
    Err(ConfigError::process_stat(
        "memory",
        "not supported on this platform",
    ))
}

/// Resident memory in whole megabytes
pub fn try_memory_mb() -> Result<u64> {
    Ok(try_memory_bytes()? / BYTES_PER_MB)
}

pub fn memory_mb() -> u64 {
    try_memory_mb().unwrap_or_else(|err| {
        err.warn("memory_mb");
        0
    })
}

/// A point-in-time reading of all process statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSnapshot {
    pub wall_time_secs: u64,
    pub wall_time_hr: String,
    pub user_cpu_secs: u64,
    pub system_cpu_secs: u64,
    pub memory_mb: u64,
}

impl ProcessSnapshot {
    pub fn capture() -> Self {
        let cpu = cpu_times_or_zero("ProcessSnapshot::capture");
        Self {
            wall_time_secs: wall_time_secs(),
            wall_time_hr: wall_time_hr(),
            user_cpu_secs: cpu.user.as_secs(),
            system_cpu_secs: cpu.system.as_secs(),
            memory_mb: memory_mb(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_statm() {
        assert_eq!(parse_statm_resident("1024 256 128 1 0 300 0\n"), Some(256));
        assert_eq!(parse_statm_resident("1024"), None);
        assert_eq!(parse_statm_resident("1024 x"), None);
    }

    #[test]
    fn test_format_hr_layout() {
        let time = Local.with_ymd_and_hms(2026, 3, 5, 9, 7, 3).unwrap();
        assert_eq!(format_hr(&time), "Thu Mar  5 09:07:03 2026");
    }

    #[test]
    fn test_wall_time_is_after_2020() {
        assert!(wall_time_secs() > 1_577_836_800);
    }

    #[cfg(unix)]
    #[test]
    fn test_cpu_times_available() {
        let times = try_cpu_times().unwrap();
        assert!(times.total() >= times.user);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_memory_reading() {
        assert!(try_memory_bytes().unwrap() > 0);
        assert!(try_memory_mb().is_ok());
    }
}
