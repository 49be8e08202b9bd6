//! The persisted record of an in-progress deck.
//!
//! A snapshot is written after every successful deck mutation and read once
//! at start-up. It is only offered for restoration while it is younger than
//! [`RESTORE_WINDOW_MS`]; older snapshots stay readable but inert.

use serde::{Deserialize, Serialize};

use crate::{
  catalog::{Style, Tradition},
  deck::Deck,
};

/// 24 hours, in milliseconds.
pub const RESTORE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  pub author:    String,
  pub deck:      Deck,
  pub dossier:   String,
  pub portrait:  Option<String>,
  pub tradition: Tradition,
  pub style:     Style,
  /// Content-mode flag the deck was summoned with.
  #[serde(default)]
  pub eros:      bool,
  /// Milliseconds since the Unix epoch.
  pub timestamp: i64,
}

impl Snapshot {
  pub fn is_restorable(&self, now_ms: i64) -> bool { is_restorable(self.timestamp, now_ms) }
}

/// Whether a snapshot written at `timestamp_ms` may be offered at `now_ms`.
pub fn is_restorable(timestamp_ms: i64, now_ms: i64) -> bool {
  now_ms.saturating_sub(timestamp_ms) < RESTORE_WINDOW_MS
}
