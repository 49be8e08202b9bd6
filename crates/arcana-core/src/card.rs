//! One entry of a generated deck.
//!
//! A card starts "bare" (id and name only) and becomes "complete" once its
//! exegesis, correspondence record and image have all been generated. Any
//! other combination is incomplete and eligible for re-fetch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a card within its deck; assigned at creation, never reused.
pub type CardId = u32;

// ─── Correspondences ─────────────────────────────────────────────────────────

/// The fixed-shape correspondence record attached to a completed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMeta {
  /// Hebrew letter; only the major arcana carry one.
  pub hebrew:     Option<String>,
  /// Astrological ruler, sign or decan.
  pub planet:     String,
  pub alchemical: String,
  /// Associated daimon, spirit or intelligence.
  pub daimon:     String,
  pub gematria:   u32,
}

// ─── Card ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id:        CardId,
  pub name:      String,
  #[serde(default)]
  pub exegesis:  Option<String>,
  #[serde(default)]
  pub meta:      Option<CardMeta>,
  #[serde(default)]
  pub image_url: Option<String>,
  /// Intermediate art direction used to build the image prompt.
  #[serde(skip_serializing, default)]
  pub visual:    Option<String>,
}

impl Card {
  pub fn bare(id: CardId, name: impl Into<String>) -> Self {
    Self {
      id,
      name: name.into(),
      exegesis: None,
      meta: None,
      image_url: None,
      visual: None,
    }
  }

  pub fn is_complete(&self) -> bool {
    self.exegesis.is_some() && self.meta.is_some() && self.image_url.is_some()
  }

  pub fn arcanum(&self) -> Option<Arcanum> { Arcanum::of(self.id) }
}

// ─── Tarot structure ─────────────────────────────────────────────────────────

pub const MAJOR_COUNT: usize = 22;
pub const SUIT_SIZE: usize = 14;
pub const DECK_SIZE: usize = MAJOR_COUNT + 4 * SUIT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
  Wands,
  Cups,
  Swords,
  Disks,
}

impl Suit {
  const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Disks];

  pub fn name(self) -> &'static str {
    match self {
      Suit::Wands => "Wands",
      Suit::Cups => "Cups",
      Suit::Swords => "Swords",
      Suit::Disks => "Disks",
    }
  }
}

/// Where a card id falls in the traditional 22 + 4×14 structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arcanum {
  /// Trump number 0–21.
  Major(u8),
  /// Rank 1 (Ace) through 14 (King).
  Minor { suit: Suit, rank: u8 },
}

impl Arcanum {
  pub fn of(id: CardId) -> Option<Self> {
    let id = id as usize;
    if id < MAJOR_COUNT {
      return Some(Self::Major(id as u8));
    }
    let minor = id - MAJOR_COUNT;
    let suit = *Suit::ALL.get(minor / SUIT_SIZE)?;
    Some(Self::Minor { suit, rank: (minor % SUIT_SIZE + 1) as u8 })
  }
}

impl fmt::Display for Arcanum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Major(0) => f.write_str("Major 0"),
      Self::Major(n) => write!(f, "Major {}", roman(*n)),
      Self::Minor { suit, rank } => {
        let rank = match rank {
          1 => "Ace".to_string(),
          11 => "Page".to_string(),
          12 => "Knight".to_string(),
          13 => "Queen".to_string(),
          14 => "King".to_string(),
          n => n.to_string(),
        };
        write!(f, "{rank} of {}", suit.name())
      }
    }
  }
}

fn roman(mut n: u8) -> String {
  const TABLE: [(u8, &str); 6] =
    [(20, "XX"), (10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")];
  let mut out = String::new();
  for (value, glyph) in TABLE {
    while n >= value {
      out.push_str(glyph);
      n -= value;
    }
  }
  out
}
