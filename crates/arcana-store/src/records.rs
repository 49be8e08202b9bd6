//! Typed records kept in [`Storage`]: the deck snapshot, preferences and the
//! tutorial flag.

use arcana_core::{
  catalog::{Style, Tradition},
  snapshot::Snapshot,
};
use serde::{Deserialize, Serialize};

use crate::{Medium, Storage, keys};

/// Defaults offered when a new ritual begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
  #[serde(default)]
  pub tradition: Tradition,
  #[serde(default)]
  pub style:     Style,
  #[serde(default)]
  pub eros:      bool,
}

impl<M: Medium> Storage<M> {
  pub fn save_snapshot(&self, snapshot: &Snapshot) -> bool { self.set(keys::SAVED_DECK, snapshot) }

  /// The stored snapshot regardless of age.
  pub fn load_snapshot(&self) -> Option<Snapshot> { self.get(keys::SAVED_DECK, None) }

  /// The stored snapshot, only if it is still eligible for restoration.
  pub fn restorable_snapshot(&self, now_ms: i64) -> Option<Snapshot> {
    self.load_snapshot().filter(|s| s.is_restorable(now_ms))
  }

  pub fn clear_snapshot(&self) -> bool { self.remove(keys::SAVED_DECK) }

  pub fn preferences(&self) -> Preferences { self.get(keys::PREFERENCES, Preferences::default()) }

  pub fn save_preferences(&self, prefs: &Preferences) -> bool { self.set(keys::PREFERENCES, prefs) }

  pub fn tutorial_seen(&self) -> bool { self.get(keys::TUTORIAL_SEEN, false) }

  pub fn mark_tutorial_seen(&self) -> bool { self.set(keys::TUTORIAL_SEEN, &true) }
}
