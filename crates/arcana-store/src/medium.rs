//! The raw string medium behind [`crate::Storage`].

use std::{collections::HashMap, sync::Mutex};

use crate::{Error, Result};

/// A fallible string key/value medium.
///
/// Implementations report failures; [`crate::Storage`] decides what to do with
/// them.
pub trait Medium: Send + Sync {
  fn read(&self, key: &str) -> Result<Option<String>>;
  fn write(&self, key: &str, value: &str) -> Result<()>;
  fn delete(&self, key: &str) -> Result<()>;
  fn clear(&self) -> Result<()>;
}

/// Process-local medium; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryMedium {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
  pub fn new() -> Self { Self::default() }
}

impl Medium for MemoryMedium {
  fn read(&self, key: &str) -> Result<Option<String>> {
    let entries = self.entries.lock().map_err(|_| Error::Poisoned)?;
    Ok(entries.get(key).cloned())
  }

  fn write(&self, key: &str, value: &str) -> Result<()> {
    let mut entries = self.entries.lock().map_err(|_| Error::Poisoned)?;
    entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<()> {
    let mut entries = self.entries.lock().map_err(|_| Error::Poisoned)?;
    entries.remove(key);
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    self.entries.lock().map_err(|_| Error::Poisoned)?.clear();
    Ok(())
  }
}
