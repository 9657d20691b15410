//! Token to entry table built from line-oriented config sources
//!
//! Accepted line format:
//!
//! ```text
//! # comment
//! token value
//! token=value
//! ```
//!
//! Empty lines and lines starting with `#` are skipped, `=` counts as
//! whitespace and only the first two fields of a line are used. Later lines
//! override earlier ones for the same token, also across sources.

use crate::config::entry::{ConfigEntry, FromEntry};
use crate::config::source::open_readable;
use crate::core::error::{ConfigError, Result};
use std::collections::btree_map::{self, BTreeMap};
use std::convert::Infallible;
use std::io::{BufRead, Cursor};
use std::path::Path;
use std::str::FromStr;

/// Content of one or more config sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    entries: BTreeMap<String, ConfigEntry>,
}

/// What a single source line amounts to
#[derive(Debug, Clone, PartialEq)]
enum ParsedLine {
    /// Empty, comment or whitespace-only
    Skip,
    /// A token without a value
    Malformed,
    Pair {
        token: String,
        value: String,
        trailing: bool,
    },
}

/// Line content without its terminator, lossily decoded
fn decode_line(buf: &[u8], line_number: usize) -> String {
    let bytes = buf.strip_suffix(b"\n").unwrap_or(buf);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(line) => line.to_string(),
        Err(_) => {
            tracing::debug!(line_number, "Replacing invalid UTF-8 in config line");
            String::from_utf8_lossy(bytes).into_owned()
        },
    }
}

fn parse_line(line: &str) -> ParsedLine {
    if line.is_empty() || line.starts_with('#') {
        return ParsedLine::Skip;
    }
    let line = line.replace('=', " ");
    let mut fields = line.split_whitespace();
    let Some(token) = fields.next() else {
        return ParsedLine::Skip;
    };
    let Some(value) = fields.next() else {
        return ParsedLine::Malformed;
    };
    ParsedLine::Pair {
        token: token.to_string(),
        value: value.to_string(),
        trailing: fields.next().is_some(),
    }
}

impl ConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a line-oriented reader
    pub fn from_reader(reader: impl BufRead) -> Self {
        let mut store = Self::new();
        store.append_reader(reader);
        store
    }

    /// Create a store from a named source (see [`ConfigStore::append_path`])
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let mut store = Self::new();
        store.append_path(path);
        store
    }

    /// Merge the content of a line-oriented reader into the store.
    ///
    /// Lines are read as bytes; invalid UTF-8 is replaced rather than
    /// ending the read, so the rest of the source still counts.
    pub fn append_reader(&mut self, mut reader: impl BufRead) -> &mut Self {
        let mut buf = Vec::new();
        let mut line_number = 0;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {},
                Err(e) => {
                    ConfigError::Io(e).warn("ConfigStore::append_reader");
                    break;
                },
            }
            line_number += 1;
            let line = decode_line(&buf, line_number);
            match parse_line(&line) {
                ParsedLine::Skip => {},
                ParsedLine::Malformed => {
                    ConfigError::MalformedLine { line_number, line }
                        .warn("ConfigStore::append_reader");
                },
                ParsedLine::Pair {
                    token,
                    value,
                    trailing,
                } => {
                    if trailing {
                        ConfigError::TrailingContent { line_number, line }
                            .warn("ConfigStore::append_reader");
                    }
                    self.entries.insert(token, ConfigEntry::new(value));
                },
            }
        }
        self
    }

    /// Merge config text held in memory
    pub fn append_str(&mut self, content: &str) -> &mut Self {
        self.append_reader(Cursor::new(content))
    }

    /// Merge a named source, leaving the store unchanged if it cannot be opened
    pub fn append_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        if let Err(err) = self.try_append_path(path) {
            err.warn("ConfigStore::append_path");
        }
        self
    }

    /// Merge a named source, failing if it cannot be opened
    pub fn try_append_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let reader = open_readable(path)?;
        Ok(self.append_reader(reader))
    }

    /// Remove all entries
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Look up a token, recording an empty entry for it if absent.
    ///
    /// An empty result is reported as "not specified". The inserted entry
    /// stays in the store, so `len()` grows after a missed lookup.
    pub fn lookup(&mut self, token: &str) -> &ConfigEntry {
        if !self.entries.contains_key(token) {
            self.entries.insert(token.to_string(), ConfigEntry::default());
        }
        let entry = &self.entries[token];
        if entry.is_empty() {
            ConfigError::missing_token(token).warn("ConfigStore::lookup");
        }
        entry
    }

    /// Look up a token without touching the store
    pub fn get(&self, token: &str) -> Option<&ConfigEntry> {
        self.entries.get(token)
    }

    /// Look up a token, failing if it is absent or empty
    pub fn try_get(&self, token: &str) -> Result<&ConfigEntry> {
        self.get(token)
            .filter(|entry| !entry.is_empty())
            .ok_or_else(|| ConfigError::missing_token(token))
    }

    /// Look up a token and extract it as `T` with lenient diagnostics
    pub fn get_as<T: FromEntry>(&mut self, token: &str) -> T {
        self.lookup(token).extract::<T>().value
    }

    /// Set a token directly, replacing any previous entry
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(token.into(), ConfigEntry::new(value));
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in token order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over `(token, entry)` pairs of a [`ConfigStore`]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, ConfigEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ConfigEntry);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(token, entry)| (token.as_str(), entry))
    }
}

impl<'a> IntoIterator for &'a ConfigStore {
    type Item = (&'a str, &'a ConfigEntry);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for ConfigStore {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut store = Self::new();
        store.append_str(s);
        Ok(store)
    }
}
