//! The never-raising JSON store.

use serde::{Serialize, de::DeserializeOwned};
use tracing::error;

use crate::Medium;

/// JSON values over a [`Medium`].
///
/// Persistence is a convenience cache: failures are logged and swallowed, so
/// callers never depend on it for correctness.
pub struct Storage<M> {
  medium: M,
}

impl<M: Medium> Storage<M> {
  pub fn new(medium: M) -> Self { Self { medium } }

  /// Read and deserialise `key`; `default` on absence, parse failure or a
  /// medium error.
  pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
    match self.medium.read(key) {
      Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
        error!(key, error = %e, "storage get error: stored value does not parse");
        default
      }),
      Ok(None) => default,
      Err(e) => {
        error!(key, error = %e, "storage get error");
        default
      }
    }
  }

  /// Serialise and write `value`. Returns `false` if nothing was stored.
  pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
    let raw = match serde_json::to_string(value) {
      Ok(raw) => raw,
      Err(e) => {
        error!(key, error = %e, "storage set error: value does not serialise");
        return false;
      }
    };
    match self.medium.write(key, &raw) {
      Ok(()) => true,
      Err(e) => {
        error!(key, error = %e, "storage set error");
        false
      }
    }
  }

  pub fn remove(&self, key: &str) -> bool {
    self
      .medium
      .delete(key)
      .inspect_err(|e| error!(key, error = %e, "storage remove error"))
      .is_ok()
  }

  pub fn clear(&self) -> bool {
    self
      .medium
      .clear()
      .inspect_err(|e| error!(error = %e, "storage clear error"))
      .is_ok()
  }

  /// Whether any value is stored under `key`.
  pub fn contains(&self, key: &str) -> bool {
    matches!(self.medium.read(key), Ok(Some(_)))
  }
}
