//! CLI command implementations

pub mod get;
pub mod list;
pub mod stats;

// Common utilities for commands
use crate::config::ConfigStore;
use anyhow::Result;
use std::path::PathBuf;

/// Merge config files in order, later files overriding earlier ones.
///
/// In strict mode a file that cannot be opened is an error; otherwise it is
/// skipped with a warning.
pub fn load_store(files: &[PathBuf], strict: bool) -> Result<ConfigStore> {
    let mut store = ConfigStore::new();
    for file in files {
        if strict {
            store.try_append_path(file)?;
        } else {
            store.append_path(file);
        }
    }
    tracing::debug!(files = files.len(), tokens = store.len(), "config loaded");
    Ok(store)
}
