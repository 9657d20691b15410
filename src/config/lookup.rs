//! One-call lookups against a store, a reader or a named source
//!
//! The reader and path forms build a throwaway store for a single query,
//! so they cost a full parse each time. Build a [`ConfigStore`] once when
//! several tokens are needed.

use crate::config::entry::{ConfigEntry, FromEntry};
use crate::config::store::ConfigStore;
use std::io::BufRead;
use std::path::Path;

/// Look up `token` in a store (records an empty entry on a miss)
pub fn get_config(store: &mut ConfigStore, token: &str) -> ConfigEntry {
    store.lookup(token).clone()
}

/// Look up `token` in a store and extract it as `T`
pub fn get_config_as<T: FromEntry>(store: &mut ConfigStore, token: &str) -> T {
    store.get_as(token)
}

/// Look up `token` in the content of a reader
pub fn get_config_from_reader(reader: impl BufRead, token: &str) -> ConfigEntry {
    get_config(&mut ConfigStore::from_reader(reader), token)
}

/// Look up `token` in the content of a reader and extract it as `T`
pub fn get_config_from_reader_as<T: FromEntry>(reader: impl BufRead, token: &str) -> T {
    get_config_as(&mut ConfigStore::from_reader(reader), token)
}

/// Look up `token` in a named source
pub fn get_config_from_path(path: impl AsRef<Path>, token: &str) -> ConfigEntry {
    get_config(&mut ConfigStore::from_path(path), token)
}

/// Look up `token` in a named source and extract it as `T`
pub fn get_config_from_path_as<T: FromEntry>(path: impl AsRef<Path>, token: &str) -> T {
    get_config_as(&mut ConfigStore::from_path(path), token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lookup_from_reader() {
        let entry = get_config_from_reader(Cursor::new("alpha=0.25\n"), "alpha");
        assert_eq!(entry.text(), "0.25");
        assert_eq!(
            get_config_from_reader_as::<f32>(Cursor::new("alpha=0.25\n"), "alpha"),
            0.25
        );
    }

    #[test]
    fn test_lookup_from_path() -> anyhow::Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "threads 8\nname run_a\n")?;

        assert_eq!(get_config_from_path_as::<u32>(file.path(), "threads"), 8);
        assert_eq!(get_config_from_path(file.path(), "name").text(), "run_a");
        assert!(get_config_from_path(file.path(), "absent").is_empty());
        Ok(())
    }

    #[test]
    fn test_store_lookup_returns_copy() {
        let mut store: ConfigStore = "k 3".parse().unwrap();
        let mut entry = get_config(&mut store, "k");
        entry.reinit("4");
        assert_eq!(get_config_as::<i32>(&mut store, "k"), 3);
    }
}
