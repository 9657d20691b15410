//! Core types and utilities for runconf
//!
//! This module contains the error type and small helpers shared by the
//! config reader and the run summary.

pub mod error;
pub mod naming;

// Re-export commonly used items
pub use error::{ConfigError, Result};
pub use naming::{file_numbering, revision};
