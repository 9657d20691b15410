//! Token/value config file reading
//!
//! A [`ConfigStore`] is filled from one or more sources and queried by token.
//! Each value comes back as a [`ConfigEntry`] that can be read as text or
//! extracted as a number, bool or char.

pub mod entry;
pub mod lookup;
pub mod source;
pub mod store;

// Re-export commonly used items
pub use entry::{Coerced, ConfigEntry, FromEntry};
pub use lookup::{
    get_config, get_config_as, get_config_from_path, get_config_from_path_as,
    get_config_from_reader, get_config_from_reader_as,
};
pub use source::{open_readable, open_writable};
pub use store::ConfigStore;
