//! Oracle readings. Ephemeral, never persisted with the deck.

use serde::{Deserialize, Serialize};

use crate::card::CardId;

/// Number of cards drawn for a reading.
pub const SPREAD_SIZE: usize = 3;

/// Three distinct cards drawn for a question, plus the generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleReading {
  pub question: String,
  pub card_ids: [CardId; SPREAD_SIZE],
  pub answer:   String,
}
