//! Prompt builders. Pure string functions; the content-mode flag only ever
//! appends text.

use crate::requesters::RitualContext;

const CORRESPONDENCE_SOURCES: &str = "The Book of Thoth, Liber 777, the Golden Dawn \
                                      instructional papers and Secrets of the Thoth Tarot";

const EROS_DOSSIER: &str = "Dwell on the esoteric nature of desire, the union of opposites \
                            and the sacred erotic.";
const EROS_CARD: &str = "Explore the carnal and ecstatic currents of this card.";
const EROS_CARD_IMAGE: &str = "erotic art, sensual, nudity, divine eros, intimacy";
const EROS_PORTRAIT: &str = "sensual, artistic nude, divine eros";
const EROS_ORACLE: &str = "Read the spread through the lens of Sacred Eros and divine union.";

fn eros(ctx: &RitualContext, text: &'static str) -> &'static str {
  if ctx.eros { text } else { "" }
}

/// Dossier and the 78 card names.
pub fn dossier(ctx: &RitualContext) -> String {
  format!(
    r#"You are a supreme adept of the {tradition} tradition.

Distil the essence of "{author}" into a complete tarot system, drawing on {sources}.
The deck will be painted in the {style} style.

1. Write a dossier of about 200 words: an academic and esoteric thesis on the
   subject's spiritual weight, archetypal essence and relation to the Mysteries.
2. Name all 78 cards, fusing the subject with the traditional archetypes, in this order:
   22 Major Arcana (0 to XXI), then Wands, Cups, Swords and Disks, each Ace through King.
3. Keep to scholarly, high-magic language.
4. Every card name must be unique.

{eros}

Reply with JSON only:
{{ "dossier": "string", "cards": ["78 strings, in order"] }}"#,
    tradition = ctx.tradition.name(),
    author = ctx.author,
    sources = CORRESPONDENCE_SOURCES,
    style = ctx.style.name(),
    eros = eros(ctx, EROS_DOSSIER),
  )
}

/// Exegesis, correspondences and art direction for one card.
pub fn card_detail(ctx: &RitualContext, card_name: &str) -> String {
  format!(
    r#"You are a grand master of the {tradition} tradition.

Write the definitive exegesis of the tarot card "{card}" as it relates to "{author}",
using {sources}.

- exegesis: about 200 words covering the card's formula, its path on the Tree of Life
  where it has one, its aeonic significance, upright and reversed meanings, and its
  bond with {author}.
- meta: the Hebrew letter (Major Arcana only, otherwise null), the astrological ruler
  or decan, the alchemical stage, the associated daimon or intelligence, and the
  gematria value (0 when none applies).
- visual: a detailed description for an artist working in the {style} style:
  composition, symbols, palette, mood.

{eros}

Reply with JSON only:
{{
  "exegesis": "string",
  "meta": {{ "hebrew": "string or null", "planet": "string", "alchemical": "string",
            "daimon": "string", "gematria": 0 }},
  "visual": "string"
}}"#,
    tradition = ctx.tradition.name(),
    card = card_name,
    author = ctx.author,
    sources = CORRESPONDENCE_SOURCES,
    style = ctx.style.name(),
    eros = eros(ctx, EROS_CARD),
  )
}

/// Image prompt for a card, built from the art direction of [`card_detail`].
///
/// The card name leads so that a simplified retry keeps the subject.
pub fn card_image(ctx: &RitualContext, card_name: &str, visual: &str) -> String {
  join_image_parts(&[
    &format!("Tarot card \"{card_name}\""),
    visual,
    ctx.style.prompt(),
    eros(ctx, EROS_CARD_IMAGE),
    "masterpiece, dramatic lighting, high detail",
  ])
}

pub fn portrait(ctx: &RitualContext) -> String {
  join_image_parts(&[
    &format!("Portrait of {}", ctx.author),
    ctx.style.prompt(),
    eros(ctx, EROS_PORTRAIT),
    "masterpiece, dramatic lighting, mystical aura",
  ])
}

/// Divinatory answer for a question over the drawn cards, in draw order.
pub fn oracle(ctx: &RitualContext, question: &str, card_names: &[&str]) -> String {
  format!(
    r#"You are the oracle of {author}, speaking through the {tradition} tradition.

Question: "{question}"
Cards drawn: {cards}

Answer in about 300 words. Address the question directly through the drawn cards,
weigh their elemental dignities, cite the qabalistic correspondences, and offer
practical guidance in the voice of {author}.

{eros}

Reply with JSON only:
{{ "answer": "string" }}"#,
    author = ctx.author,
    tradition = ctx.tradition.name(),
    question = question,
    cards = card_names.join(", "),
    eros = eros(ctx, EROS_ORACLE),
  )
}

fn join_image_parts(parts: &[&str]) -> String {
  parts
    .iter()
    .map(|p| p.trim().trim_end_matches('.'))
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}
