//! The ordered, fixed-size sequence of cards.
//!
//! A deck is created in full and never reordered or resized afterwards. Cards
//! are replaced in place by id as their generation calls complete; since ids
//! equal positions, independently completed cards can be merged in any order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  card::{Card, CardId, DECK_SIZE},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
  cards: Vec<Card>,
}

impl Deck {
  /// Build a bare deck from the authoritative list of card names.
  ///
  /// The list must hold exactly [`DECK_SIZE`] non-blank, unique names.
  pub fn from_names<I, S>(names: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let names: Vec<String> = names
      .into_iter()
      .map(|n| n.into().trim().to_owned())
      .collect();

    if names.len() != DECK_SIZE {
      return Err(Error::MalformedDeckResponse(format!(
        "expected {DECK_SIZE} card names, got {}",
        names.len()
      )));
    }
    if let Some(pos) = names.iter().position(String::is_empty) {
      return Err(Error::MalformedDeckResponse(format!(
        "card name at position {pos} is blank"
      )));
    }
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    for name in &names {
      if !seen.insert(name.to_lowercase()) {
        return Err(Error::MalformedDeckResponse(format!(
          "duplicate card name: {name:?}"
        )));
      }
    }

    let cards = names
      .into_iter()
      .enumerate()
      .map(|(i, name)| Card::bare(i as CardId, name))
      .collect();
    Ok(Self { cards })
  }

  pub fn len(&self) -> usize { self.cards.len() }

  pub fn is_empty(&self) -> bool { self.cards.is_empty() }

  pub fn cards(&self) -> &[Card] { &self.cards }

  pub fn iter(&self) -> impl Iterator<Item = &Card> { self.cards.iter() }

  pub fn get(&self, id: CardId) -> Option<&Card> { self.cards.get(id as usize) }

  /// Replace the entry with the same id.
  ///
  /// The name is part of the card's identity; a card whose name differs from
  /// the deck entry is rejected.
  pub fn replace(&mut self, card: Card) -> Result<()> {
    let slot = self
      .cards
      .get_mut(card.id as usize)
      .ok_or(Error::CardNotFound(card.id))?;
    if slot.name != card.name {
      return Err(Error::CardMismatch(card.id));
    }
    *slot = card;
    Ok(())
  }

  /// Ids of every card that still needs generation, ascending.
  pub fn incomplete_ids(&self) -> Vec<CardId> {
    self
      .cards
      .iter()
      .filter(|c| !c.is_complete())
      .map(|c| c.id)
      .collect()
  }

  pub fn completed(&self) -> usize { self.cards.iter().filter(|c| c.is_complete()).count() }

  pub fn is_complete(&self) -> bool { self.cards.iter().all(Card::is_complete) }
}

impl TryFrom<Vec<Card>> for Deck {
  type Error = Error;

  /// Restore a deck from persisted cards, checking size and id order.
  fn try_from(cards: Vec<Card>) -> Result<Self> {
    if cards.len() != DECK_SIZE {
      return Err(Error::MalformedPayload(format!(
        "a deck holds {DECK_SIZE} cards, found {}",
        cards.len()
      )));
    }
    if let Some(card) = cards.iter().enumerate().find(|(i, c)| c.id as usize != *i) {
      return Err(Error::MalformedPayload(format!(
        "card {:?} is out of position at index {}",
        card.1.name, card.0
      )));
    }
    Ok(Self { cards })
  }
}

impl From<Deck> for Vec<Card> {
  fn from(deck: Deck) -> Self { deck.cards }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::card::CardMeta;

  fn names() -> Vec<String> { (0..DECK_SIZE).map(|i| format!("Card {i}")).collect() }

  fn complete(card: &Card) -> Card {
    Card {
      exegesis: Some("text".into()),
      meta: Some(CardMeta {
        hebrew:     None,
        planet:     "Sol".into(),
        alchemical: "Rubedo".into(),
        daimon:     "Och".into(),
        gematria:   6,
      }),
      image_url: Some("data:image/png;base64,AA==".into()),
      ..card.clone()
    }
  }

  #[test]
  fn names_become_bare_cards_in_order() {
    let deck = Deck::from_names(names()).unwrap();
    assert_eq!(deck.len(), 78);
    for (i, card) in deck.iter().enumerate() {
      assert_eq!(card.id as usize, i);
      assert_eq!(card.name, format!("Card {i}"));
      assert!(!card.is_complete());
    }
  }

  #[test]
  fn wrong_count_is_rejected() {
    let mut short = names();
    short.pop();
    assert!(matches!(
      Deck::from_names(short),
      Err(Error::MalformedDeckResponse(_))
    ));
  }

  #[test]
  fn duplicates_are_rejected() {
    let mut dup = names();
    dup[40] = "card 3".into();
    let err = Deck::from_names(dup).unwrap_err();
    assert!(matches!(err, Error::MalformedDeckResponse(_)));
  }

  #[test]
  fn blank_names_are_rejected() {
    let mut blank = names();
    blank[0] = "   ".into();
    assert!(Deck::from_names(blank).is_err());
  }

  #[test]
  fn replace_by_id_only_touches_that_card() {
    let mut deck = Deck::from_names(names()).unwrap();
    let done = complete(deck.get(40).unwrap());
    deck.replace(done.clone()).unwrap();

    assert_eq!(deck.get(40), Some(&done));
    assert_eq!(deck.completed(), 1);
    assert_eq!(deck.incomplete_ids().len(), 77);
    assert!(!deck.incomplete_ids().contains(&40));
  }

  #[test]
  fn replace_rejects_unknown_or_renamed_cards() {
    let mut deck = Deck::from_names(names()).unwrap();
    assert!(matches!(
      deck.replace(Card::bare(78, "Extra")),
      Err(Error::CardNotFound(78))
    ));
    assert!(matches!(
      deck.replace(Card::bare(5, "Renamed")),
      Err(Error::CardMismatch(5))
    ));
  }

  #[test]
  fn serde_enforces_shape() {
    let deck = Deck::from_names(names()).unwrap();
    let json = serde_json::to_value(&deck).unwrap();
    assert!(json.is_array());
    let back: Deck = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(back, deck);

    let mut cards = json.as_array().unwrap().clone();
    cards.swap(0, 1);
    assert!(serde_json::from_value::<Deck>(serde_json::Value::Array(cards)).is_err());
  }
}
