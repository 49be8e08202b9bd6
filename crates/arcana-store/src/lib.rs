//! Local persistence for arcana.
//!
//! A small key/value store for in-progress deck state and user preferences.
//! [`Storage`] never raises: every failure of the underlying [`Medium`] is
//! logged and degrades to a default value or a `false` return.

mod schema;

pub mod error;
pub mod keys;
pub mod medium;
pub mod records;
pub mod sqlite;
pub mod storage;

pub use error::{Error, Result};
pub use medium::{Medium, MemoryMedium};
pub use records::Preferences;
pub use sqlite::SqliteMedium;
pub use storage::Storage;

#[cfg(test)]
mod tests;
