//! Content requesters: one function per kind of generated content.
//!
//! Each builds its prompt, calls the [`Generator`] and decodes the reply into
//! typed values. Decoding is strict; a reply of the wrong shape is an error,
//! never a partially filled value.

use arcana_core::{
  Error, Result,
  card::{Card, CardMeta},
  catalog::{Style, Tradition},
  deck::Deck,
  generator::Generator,
  reading::SPREAD_SIZE,
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info};

use crate::prompts;

/// Everything a prompt needs to know about the current ritual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RitualContext {
  pub author:    String,
  pub tradition: Tradition,
  pub style:     Style,
  /// Content mode; appends instruction text to every prompt.
  pub eros:      bool,
}

// ─── Payloads ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DossierPayload {
  dossier: String,
  cards:   Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CardPayload {
  exegesis: String,
  meta:     CardMeta,
  visual:   String,
}

#[derive(Debug, Deserialize)]
struct AnswerPayload {
  answer: String,
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
  serde_json::from_value(value).map_err(|e| Error::MalformedPayload(format!("{what}: {e}")))
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Summon the dossier and the full deck of bare cards.
pub async fn summon_deck<G: Generator>(generator: &G, ctx: &RitualContext) -> Result<(String, Deck)> {
  info!(author = %ctx.author, tradition = ctx.tradition.id(), "summoning deck");
  let value = generator.generate_text(&prompts::dossier(ctx), true).await?;
  let payload: DossierPayload = serde_json::from_value(value)
    .map_err(|e| Error::MalformedDeckResponse(format!("deck reply has the wrong shape: {e}")))?;
  let deck = Deck::from_names(payload.cards)?;
  Ok((payload.dossier, deck))
}

/// Complete one card: text first, then the image built from its art
/// direction. Either phase failing fails the call and leaves nothing behind.
pub async fn forge_card<G: Generator>(generator: &G, ctx: &RitualContext, card: &Card) -> Result<Card> {
  debug!(card = card.id, name = %card.name, "forging card");
  let value = generator
    .generate_text(&prompts::card_detail(ctx, &card.name), true)
    .await?;
  let payload: CardPayload = decode(value, "card detail")?;

  let image_prompt = prompts::card_image(ctx, &card.name, &payload.visual);
  let image_url = generator.generate_image(&image_prompt).await?;

  Ok(Card {
    id:        card.id,
    name:      card.name.clone(),
    exegesis:  Some(payload.exegesis),
    meta:      Some(payload.meta),
    image_url: Some(image_url),
    visual:    Some(payload.visual),
  })
}

pub async fn paint_portrait<G: Generator>(generator: &G, ctx: &RitualContext) -> Result<String> {
  generator.generate_image(&prompts::portrait(ctx)).await
}

/// Ask the oracle about `question` over exactly three drawn cards.
pub async fn consult_oracle<G: Generator>(
  generator: &G,
  ctx: &RitualContext,
  question: &str,
  cards: &[Card; SPREAD_SIZE],
) -> Result<String> {
  let names = cards.each_ref().map(|c| c.name.as_str());
  let value = generator
    .generate_text(&prompts::oracle(ctx, question, &names), true)
    .await?;
  let payload: AnswerPayload = decode(value, "oracle answer")?;
  Ok(payload.answer)
}
