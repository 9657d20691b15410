//! List command implementation

use crate::config::ConfigStore;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// One listed token
#[derive(Debug, Clone, Serialize)]
struct ListedEntry<'a> {
    token: &'a str,
    text: &'a str,
    /// `null` for non-numeric and non-finite values
    numeric: Option<f64>,
    numeric_valid: bool,
}

/// Execute the list command
pub fn execute(files: Vec<PathBuf>, json: bool) -> Result<()> {
    let store = super::load_store(&files, false)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing(&store))?);
        return Ok(());
    }

    if store.is_empty() {
        println!("{}", "(no entries)".dimmed());
        return Ok(());
    }

    let width = store.iter().map(|(token, _)| token.len()).max().unwrap_or(0);
    for (token, entry) in &store {
        let text = if entry.success() {
            entry.text().cyan()
        } else {
            entry.text().normal()
        };
        println!("{:width$}  {}", token.bold(), text, width = width);
    }
    Ok(())
}

fn listing(store: &ConfigStore) -> Vec<ListedEntry<'_>> {
    store
        .iter()
        .map(|(token, entry)| ListedEntry {
            token,
            text: entry.text(),
            numeric: Some(entry.numeric_value()).filter(|v| entry.success() && v.is_finite()),
            numeric_valid: entry.success(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_json_shape() -> Result<()> {
        let store: ConfigStore = "a 1\nb nan\nc word".parse().unwrap();
        let value = serde_json::to_value(listing(&store))?;
        assert_eq!(
            value,
            serde_json::json!([
                {"token": "a", "text": "1", "numeric": 1.0, "numeric_valid": true},
                {"token": "b", "text": "nan", "numeric": null, "numeric_valid": true},
                {"token": "c", "text": "word", "numeric": null, "numeric_valid": false},
            ])
        );
        Ok(())
    }
}
