//! Oracle readings: draw three distinct cards, make sure each has content,
//! then ask the question over them.

use arcana_core::{
  Error, Result,
  card::{Card, CardId},
  deck::Deck,
  generator::Generator,
  reading::{OracleReading, SPREAD_SIZE},
};
use rand::{Rng, seq::index};
use tracing::warn;

use crate::requesters::{RitualContext, consult_oracle, forge_card};

/// Draw [`SPREAD_SIZE`] distinct card ids, without replacement.
pub fn draw<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Result<[CardId; SPREAD_SIZE]> {
  draw_from(deck.len(), rng)
}

fn draw_from<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<[CardId; SPREAD_SIZE]> {
  if len < SPREAD_SIZE {
    return Err(Error::DeckTooSmall { needed: SPREAD_SIZE, found: len });
  }
  let picked = index::sample(rng, len, SPREAD_SIZE);
  let mut ids = [0; SPREAD_SIZE];
  for (slot, i) in ids.iter_mut().zip(picked.iter()) {
    *slot = i as CardId;
  }
  Ok(ids)
}

/// Complete the drawn cards that are still unfinished, concurrently.
///
/// Successes are merged into `deck`; a card whose generation fails is used as
/// it was.
pub async fn resolve<G: Generator>(
  generator: &G,
  ctx: &RitualContext,
  deck: &mut Deck,
  ids: [CardId; SPREAD_SIZE],
) -> Result<[Card; SPREAD_SIZE]> {
  let [a, b, c] = ids.map(|id| deck.get(id).cloned().ok_or(Error::CardNotFound(id)));
  let (a, b, c) = (a?, b?, c?);

  let (a, b, c) = tokio::join!(
    complete(generator, ctx, a),
    complete(generator, ctx, b),
    complete(generator, ctx, c),
  );

  let cards = [a, b, c];
  for (card, forged) in &cards {
    if *forged {
      deck.replace(card.clone())?;
    }
  }
  Ok(cards.map(|(card, _)| card))
}

async fn complete<G: Generator>(generator: &G, ctx: &RitualContext, card: Card) -> (Card, bool) {
  if card.is_complete() {
    return (card, false);
  }
  match forge_card(generator, ctx, &card).await {
    Ok(done) => (done, true),
    Err(e) => {
      warn!(card = card.id, error = %e, "drawn card could not be completed, reading it bare");
      (card, false)
    }
  }
}

/// Draw, resolve and consult. The reading is returned, never stored in the deck.
pub async fn cast_reading<G: Generator, R: Rng + ?Sized>(
  generator: &G,
  ctx: &RitualContext,
  deck: &mut Deck,
  question: &str,
  rng: &mut R,
) -> Result<OracleReading> {
  let question = question.trim();
  if question.is_empty() {
    return Err(Error::EmptyQuestion);
  }
  let card_ids = draw(deck, rng)?;
  let cards = resolve(generator, ctx, deck, card_ids).await?;
  let answer = consult_oracle(generator, ctx, question, &cards).await?;
  Ok(OracleReading { question: question.to_owned(), card_ids, answer })
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use arcana_core::catalog::{Style, Tradition};
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;
  use crate::testing::{FakeGenerator, deck_names};

  fn ctx() -> RitualContext {
    RitualContext {
      author: "Paracelsus".into(),
      tradition: Tradition::Thoth,
      style: Style::Baroque,
      eros: true,
    }
  }

  fn deck() -> Deck { Deck::from_names(deck_names()).unwrap() }

  #[test]
  fn draws_are_distinct_and_in_range() {
    let deck = deck();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
      let ids = draw(&deck, &mut rng).unwrap();
      let unique: HashSet<_> = ids.iter().collect();
      assert_eq!(unique.len(), SPREAD_SIZE);
      assert!(ids.iter().all(|&id| (id as usize) < deck.len()));
    }
  }

  #[test]
  fn short_deck_cannot_hold_a_spread() {
    let mut rng = StdRng::seed_from_u64(7);
    let err = draw_from(2, &mut rng).unwrap_err();
    assert!(matches!(err, Error::DeckTooSmall { needed: SPREAD_SIZE, found: 2 }));
    assert_eq!(err.code(), "DECK_TOO_SMALL");
    assert!(draw_from(SPREAD_SIZE, &mut rng).is_ok());
  }

  #[tokio::test]
  async fn drawn_cards_are_completed_and_merged() {
    let generator = FakeGenerator::new();
    let mut deck = deck();
    let cards = resolve(&generator, &ctx(), &mut deck, [5, 50, 70]).await.unwrap();

    assert!(cards.iter().all(Card::is_complete));
    for id in [5, 50, 70] {
      assert!(deck.get(id).unwrap().is_complete());
    }
    assert_eq!(deck.completed(), 3);
  }

  #[tokio::test]
  async fn failed_completion_falls_back_to_the_bare_card() {
    let generator = FakeGenerator::new().failing_image("\"Card 50\"");
    let mut deck = deck();
    let cards = resolve(&generator, &ctx(), &mut deck, [5, 50, 70]).await.unwrap();

    assert_eq!(cards[1], Card::bare(50, "Card 50"));
    assert!(!deck.get(50).unwrap().is_complete());
    assert!(deck.get(5).unwrap().is_complete());
  }

  #[tokio::test]
  async fn complete_cards_are_not_regenerated() {
    let generator = FakeGenerator::new();
    let mut deck = deck();
    resolve(&generator, &ctx(), &mut deck, [1, 2, 3]).await.unwrap();
    let calls = generator.text_prompts().len();
    resolve(&generator, &ctx(), &mut deck, [1, 2, 3]).await.unwrap();
    assert_eq!(generator.text_prompts().len(), calls);
  }

  #[tokio::test]
  async fn reading_answers_the_trimmed_question() {
    let generator = FakeGenerator::new();
    let mut deck = deck();
    let mut rng = StdRng::seed_from_u64(1);
    let reading = cast_reading(&generator, &ctx(), &mut deck, "  Shall I travel?  ", &mut rng)
      .await
      .unwrap();
    assert_eq!(reading.question, "Shall I travel?");
    assert_eq!(reading.answer, "The answer to \"Shall I travel?\"");
    assert_eq!(deck.completed(), 3);
  }

  #[tokio::test]
  async fn blank_question_is_rejected_before_any_call() {
    let generator = FakeGenerator::new();
    let mut deck = deck();
    let mut rng = StdRng::seed_from_u64(1);
    let err = cast_reading(&generator, &ctx(), &mut deck, "   ", &mut rng).await.unwrap_err();
    assert!(matches!(err, Error::EmptyQuestion));
    assert!(generator.text_prompts().is_empty());
  }
}
