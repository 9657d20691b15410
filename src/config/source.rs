//! Opening config sources and output sinks by name
//!
//! Names ending in `.zst` are transparently (de)compressed with zstd and the
//! name `-` maps to stdin/stdout. Everything else is a plain file.

use crate::core::error::{ConfigError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// File name suffix of zstd-compressed sources
pub const ZSTD_SUFFIX: &str = ".zst";

/// Name that stands for the standard streams
pub const STDIO_NAME: &str = "-";

/// How the bytes behind a name are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Stdio,
    Plain,
    Zstd,
}

impl SourceKind {
    /// Classify a name by its pattern
    pub fn of(path: &Path) -> Self {
        if path.as_os_str() == STDIO_NAME {
            SourceKind::Stdio
        } else if path.to_string_lossy().ends_with(ZSTD_SUFFIX) {
            SourceKind::Zstd
        } else {
            SourceKind::Plain
        }
    }
}

/// Open a readable, line-oriented source
pub fn open_readable(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    match SourceKind::of(path) {
        SourceKind::Stdio => Ok(Box::new(BufReader::new(io::stdin()))),
        SourceKind::Plain => {
            let file = File::open(path).map_err(|e| ConfigError::source_open(path, e))?;
            Ok(Box::new(BufReader::new(file)))
        },
        SourceKind::Zstd => {
            let file = File::open(path).map_err(|e| ConfigError::source_open(path, e))?;
            let decoder =
                zstd::stream::read::Decoder::new(file).map_err(|e| ConfigError::Decompression {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            Ok(Box::new(BufReader::new(decoder)))
        },
    }
}

/// Open a writable sink, truncating any existing file
pub fn open_writable(path: impl AsRef<Path>) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    match SourceKind::of(path) {
        SourceKind::Stdio => Ok(Box::new(io::stdout())),
        SourceKind::Plain => {
            let file = File::create(path).map_err(|e| ConfigError::source_open(path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        },
        SourceKind::Zstd => {
            let file = File::create(path).map_err(|e| ConfigError::source_open(path, e))?;
            let encoder = zstd::stream::write::Encoder::new(file, 0)?;
            Ok(Box::new(encoder.auto_finish()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_source_kind() {
        assert_eq!(SourceKind::of(Path::new("-")), SourceKind::Stdio);
        assert_eq!(SourceKind::of(Path::new("run.cfg")), SourceKind::Plain);
        assert_eq!(SourceKind::of(Path::new("run.cfg.zst")), SourceKind::Zstd);
        assert_eq!(SourceKind::of(Path::new("dir/-")), SourceKind::Plain);
    }

    #[test]
    fn test_plain_write_then_read() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("plain.cfg");

        {
            let mut sink = open_writable(&path)?;
            writeln!(sink, "alpha 1")?;
            sink.flush()?;
        }

        let mut text = String::new();
        open_readable(&path)?.read_to_string(&mut text)?;
        assert_eq!(text, "alpha 1\n");
        Ok(())
    }

    #[test]
    fn test_zstd_write_then_read() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("packed.cfg.zst");

        {
            let mut sink = open_writable(&path)?;
            writeln!(sink, "beta 2")?;
        }

        // The file on disk is compressed
        let raw = std::fs::read(&path)?;
        assert_ne!(raw, b"beta 2\n");
        assert_eq!(zstd::decode_all(&raw[..])?, b"beta 2\n");

        let mut text = String::new();
        open_readable(&path)?.read_to_string(&mut text)?;
        assert_eq!(text, "beta 2\n");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_source_open_error() {
        let result = open_readable("/definitely/not/here.cfg");
        assert!(matches!(result, Err(ConfigError::SourceOpen { .. })));
    }
}
