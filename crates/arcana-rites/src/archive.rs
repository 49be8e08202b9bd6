//! The export bundle: everything needed to render a finished grimoire.

use arcana_core::{
  card::Card,
  catalog::{Style, Tradition},
  reading::OracleReading,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
  pub author:    String,
  pub tradition: Tradition,
  pub style:     Style,
  pub dossier:   String,
  pub portrait:  Option<String>,
  pub cards:     Vec<Card>,
  pub reading:   Option<ArchivedReading>,
}

/// A reading with its card ids resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedReading {
  pub question: String,
  pub cards:    Vec<String>,
  pub answer:   String,
}

impl ArchivedReading {
  pub fn resolve(reading: &OracleReading, cards: &[Card]) -> Self {
    Self {
      question: reading.question.clone(),
      cards:    reading
        .card_ids
        .iter()
        .map(|&id| {
          cards
            .get(id as usize)
            .map_or_else(|| format!("#{id}"), |c| c.name.clone())
        })
        .collect(),
      answer:   reading.answer.clone(),
    }
  }
}

impl Archive {
  /// `GRIMOIRE_<author>_<timestamp>`, whitespace in the author collapsed to `_`.
  pub fn file_stem(&self, timestamp_ms: i64) -> String {
    let author = self.author.split_whitespace().collect::<Vec<_>>().join("_");
    format!("GRIMOIRE_{author}_{timestamp_ms}")
  }

  pub fn completed(&self) -> usize { self.cards.iter().filter(|c| c.is_complete()).count() }
}
