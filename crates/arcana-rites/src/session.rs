//! Application state and its transitions.
//!
//! Each transition corresponds to one user action. It either succeeds and
//! commits its result to the session, or fails and leaves the session exactly
//! as it was.

use arcana_core::{
  Error, Result,
  card::{Card, CardId},
  catalog::{Style, Tradition},
  deck::Deck,
  generator::Generator,
  reading::OracleReading,
  snapshot::Snapshot,
};
use rand::Rng;
use tracing::info;

use crate::{
  archive::{Archive, ArchivedReading},
  batch::{FillReport, Progress, fill_deck},
  oracle::cast_reading,
  requesters::{RitualContext, forge_card, paint_portrait, summon_deck},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  ctx:          RitualContext,
  deck:         Option<Deck>,
  dossier:      Option<String>,
  portrait:     Option<String>,
  last_reading: Option<OracleReading>,
}

impl Session {
  pub fn new(author: &str, tradition: Tradition, style: Style, eros: bool) -> Result<Self> {
    let author = author.trim();
    if author.is_empty() {
      return Err(Error::EmptyAuthor);
    }
    Ok(Self {
      ctx:          RitualContext { author: author.to_owned(), tradition, style, eros },
      deck:         None,
      dossier:      None,
      portrait:     None,
      last_reading: None,
    })
  }

  /// Resume from a persisted snapshot. The last reading is not restored.
  pub fn restore(snapshot: Snapshot) -> Self {
    Self {
      ctx:          RitualContext {
        author:    snapshot.author,
        tradition: snapshot.tradition,
        style:     snapshot.style,
        eros:      snapshot.eros,
      },
      deck:         Some(snapshot.deck),
      dossier:      Some(snapshot.dossier),
      portrait:     snapshot.portrait,
      last_reading: None,
    }
  }

  pub fn context(&self) -> &RitualContext { &self.ctx }

  pub fn author(&self) -> &str { &self.ctx.author }

  pub fn deck(&self) -> Option<&Deck> { self.deck.as_ref() }

  pub fn dossier(&self) -> Option<&str> { self.dossier.as_deref() }

  pub fn portrait(&self) -> Option<&str> { self.portrait.as_deref() }

  pub fn last_reading(&self) -> Option<&OracleReading> { self.last_reading.as_ref() }

  // ─── Transitions ───────────────────────────────────────────────────────────

  /// Summon the deck and paint the portrait. Both are kept, or neither.
  pub async fn begin_ritual<G: Generator>(&mut self, generator: &G) -> Result<()> {
    let (dossier, deck) = summon_deck(generator, &self.ctx).await?;
    let portrait = paint_portrait(generator, &self.ctx).await?;
    info!(author = %self.ctx.author, "ritual complete");

    self.deck = Some(deck);
    self.dossier = Some(dossier);
    self.portrait = Some(portrait);
    self.last_reading = None;
    Ok(())
  }

  /// Complete card `id`. A card that is already complete is returned as is.
  pub async fn forge<G: Generator>(&mut self, generator: &G, id: CardId) -> Result<&Card> {
    let deck = self.deck.as_mut().ok_or(Error::NoDeck)?;
    let card = deck.get(id).ok_or(Error::CardNotFound(id))?;
    if !card.is_complete() {
      let done = forge_card(generator, &self.ctx, card).await?;
      deck.replace(done)?;
    }
    deck.get(id).ok_or(Error::CardNotFound(id))
  }

  pub async fn fill<G: Generator>(
    &mut self,
    generator: &G,
    progress: impl FnMut(Progress, &Deck),
  ) -> Result<FillReport> {
    let deck = self.deck.as_mut().ok_or(Error::NoDeck)?;
    Ok(fill_deck(generator, &self.ctx, deck, progress).await)
  }

  /// Cast a reading. Cards completed along the way stay in the deck even if
  /// the oracle itself then fails.
  pub async fn cast<G: Generator, R: Rng + ?Sized>(
    &mut self,
    generator: &G,
    question: &str,
    rng: &mut R,
  ) -> Result<&OracleReading> {
    let deck = self.deck.as_mut().ok_or(Error::NoDeck)?;
    let reading = cast_reading(generator, &self.ctx, deck, question, rng).await?;
    Ok(self.last_reading.insert(reading))
  }

  /// The persistable state, once a deck exists.
  pub fn snapshot(&self, now_ms: i64) -> Option<Snapshot> {
    Some(Snapshot {
      author:    self.ctx.author.clone(),
      deck:      self.deck.clone()?,
      dossier:   self.dossier.clone()?,
      portrait:  self.portrait.clone(),
      tradition: self.ctx.tradition,
      style:     self.ctx.style,
      eros:      self.ctx.eros,
      timestamp: now_ms,
    })
  }

  pub fn archive(&self) -> Result<Archive> {
    let deck = self.deck.as_ref().ok_or(Error::NoDeck)?;
    Ok(Archive {
      author:    self.ctx.author.clone(),
      tradition: self.ctx.tradition,
      style:     self.ctx.style,
      dossier:   self.dossier.clone().unwrap_or_default(),
      portrait:  self.portrait.clone(),
      cards:     deck.cards().to_vec(),
      reading:   self
        .last_reading
        .as_ref()
        .map(|r| ArchivedReading::resolve(r, deck.cards())),
    })
  }
}
