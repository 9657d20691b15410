//! Stats command implementation

use crate::process::{ProcessSnapshot, RunSummary};
use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

/// Execute the stats command
pub fn execute(json: bool, summary: Option<&RunSummary>) -> Result<()> {
    let snapshot = ProcessSnapshot::capture();

    if json {
        let mut value = serde_json::to_value(&snapshot)?;
        if let Some(summary) = summary {
            value["started_at"] = summary.start_time_hr().into();
            value["max_memory_mb"] = summary.max_memory_mb().into();
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let secs = |s: u64| humantime::format_duration(Duration::from_secs(s)).to_string();
    println!("{}: {}", "Time".bold(), snapshot.wall_time_hr.cyan());
    if let Some(summary) = summary {
        println!("{}: {}", "Started at".bold(), summary.start_time_hr().cyan());
    }
    println!("{}: {}", "User CPU".bold(), secs(snapshot.user_cpu_secs));
    println!("{}: {}", "System CPU".bold(), secs(snapshot.system_cpu_secs));
    println!("{}: {} MB", "Memory".bold(), snapshot.memory_mb);
    if let Some(summary) = summary {
        println!("{}: {} MB", "Peak memory".bold(), summary.max_memory_mb());
    }
    Ok(())
}
