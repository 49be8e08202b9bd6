//! Command handlers. Each loads what it needs from the store, drives the
//! session through one transition, and persists the result.

use std::path::Path;

use anyhow::{Context as _, bail};
use arcana_core::{
  card::{CardId, DECK_SIZE},
  catalog::{Style, Tradition},
  reading::OracleReading,
  snapshot::Snapshot,
};
use arcana_gemini::GeminiClient;
use arcana_rites::Session;
use arcana_store::{Preferences, SqliteMedium, Storage};
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::{export, settings::Settings};

pub struct App {
  settings: Settings,
  storage:  Storage<SqliteMedium>,
  client:   GeminiClient,
}

fn now_ms() -> i64 { Utc::now().timestamp_millis() }

/// Lift a service error into a report headed by its code and summary.
fn explain(err: arcana_core::Error) -> anyhow::Error {
  let headline = format!("[{}] {}", err.code(), err.summary());
  anyhow::Error::new(err).context(headline)
}

impl App {
  pub fn open(settings: Settings) -> anyhow::Result<Self> {
    let medium = SqliteMedium::open(&settings.store_path)
      .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
    let client = GeminiClient::new(settings.gemini()).map_err(explain)?;
    Ok(Self { settings, storage: Storage::new(medium), client })
  }

  /// First-run introduction.
  pub fn greet(&self) {
    if self.storage.tutorial_seen() {
      return;
    }
    println!("Welcome to arcana.");
    println!("  1. `arcana ritual --author <name>` summons a deck of 78 cards, a dossier and a portrait.");
    println!("  2. `arcana forge <id>` or `arcana fill` inscribes the cards.");
    println!("  3. `arcana oracle <question>` draws three cards and answers.");
    println!("  4. `arcana export` binds everything into a grimoire.");
    println!();
    self.storage.mark_tutorial_seen();
  }

  fn session(&self) -> anyhow::Result<Session> {
    self
      .storage
      .restorable_snapshot(now_ms())
      .map(Session::restore)
      .context("no saved deck from the last 24 hours; run `arcana ritual` first")
  }

  fn persist(&self, session: &Session) {
    if let Some(snapshot) = session.snapshot(now_ms())
      && !self.storage.save_snapshot(&snapshot)
    {
      warn!("progress could not be saved");
    }
  }

  /// Cast a reading and persist the deck whether or not the oracle answers,
  /// so cards forged while resolving the spread survive a failed reading.
  async fn cast(&self, session: &mut Session, question: &str) -> anyhow::Result<OracleReading> {
    let mut rng = StdRng::from_entropy();
    let result = session.cast(&self.client, question, &mut rng).await.cloned();
    self.persist(session);
    result.map_err(explain)
  }

  // ─── Commands ──────────────────────────────────────────────────────────────

  pub fn check(&self) -> anyhow::Result<()> {
    self.client.check_credential().map_err(explain)?;
    let cfg = self.client.config();
    println!("API key configured.");
    println!("  text model:  {}", cfg.text_model);
    println!("  image model: {}", cfg.image_model);
    println!("  retries:     {} x {} ms", cfg.retry.max_attempts, cfg.retry.base_delay.as_millis());
    println!("  store:       {}", self.settings.store_path.display());
    Ok(())
  }

  pub fn catalog(&self) {
    println!("Traditions:");
    for t in Tradition::iter() {
      println!("  {:<10} {:<22} {}", t.id(), t.name(), t.description());
    }
    println!("\nStyles:");
    for s in Style::iter() {
      println!("  {:<13} {:<30} {:?}", s.id(), s.name(), s.category());
    }
  }

  pub async fn ritual(
    &self,
    author: &str,
    tradition: Option<Tradition>,
    style: Option<Style>,
    eros: Option<bool>,
  ) -> anyhow::Result<()> {
    let prefs = self.storage.preferences();
    let mut session = Session::new(
      author,
      tradition.unwrap_or(prefs.tradition),
      style.unwrap_or(prefs.style),
      eros.unwrap_or(prefs.eros),
    )
    .map_err(explain)?;

    println!("Invoking the high arcanum for {}...", session.author());
    session.begin_ritual(&self.client).await.map_err(explain)?;
    self.persist(&session);

    if let Some(dossier) = session.dossier() {
      println!("\n{dossier}\n");
    }
    if let Some(deck) = session.deck() {
      for card in deck.iter() {
        println!("  {:>2}  {}", card.id, card.name);
      }
    }
    Ok(())
  }

  pub fn status(&self) -> anyhow::Result<()> {
    let Some(snapshot) = self.storage.load_snapshot() else {
      println!("No saved deck.");
      return Ok(());
    };
    let now = now_ms();
    print_status(&snapshot, now);
    if !snapshot.is_restorable(now) {
      println!("This deck is older than 24 hours and will not be resumed.");
    }
    Ok(())
  }

  pub async fn forge(&self, id: CardId) -> anyhow::Result<()> {
    if id as usize >= DECK_SIZE {
      bail!("card ids run from 0 to {}", DECK_SIZE - 1);
    }
    let mut session = self.session()?;
    let card = session.forge(&self.client, id).await.map_err(explain)?.clone();
    self.persist(&session);

    println!("{}  {}", card.id, card.name);
    if let Some(arcanum) = card.arcanum() {
      println!("{arcanum}");
    }
    if let Some(meta) = &card.meta {
      println!(
        "hebrew: {}  planet: {}  alchemical: {}  daimon: {}  gematria: {}",
        meta.hebrew.as_deref().unwrap_or("none"),
        meta.planet,
        meta.alchemical,
        meta.daimon,
        meta.gematria
      );
    }
    if let Some(exegesis) = &card.exegesis {
      println!("\n{exegesis}");
    }
    Ok(())
  }

  pub async fn fill(&self) -> anyhow::Result<()> {
    let mut session = self.session()?;
    self.fill_session(&mut session).await
  }

  async fn fill_session(&self, session: &mut Session) -> anyhow::Result<()> {
    let mut template = session.snapshot(now_ms());
    let report = session
      .fill(&self.client, |progress, deck| {
        println!("  inscribed {}/{}", progress.completed, progress.total);
        if let Some(snapshot) = template.as_mut() {
          snapshot.deck = deck.clone();
          snapshot.timestamp = now_ms();
          self.storage.save_snapshot(snapshot);
        }
      })
      .await
      .map_err(explain)?;
    self.persist(session);

    info!(forged = report.forged.len(), failed = report.failed.len(), "fill complete");
    if !report.failed.is_empty() {
      println!("{} card(s) could not be inscribed: {:?}", report.failed.len(), report.failed);
    }
    Ok(())
  }

  pub async fn oracle(&self, question: &str) -> anyhow::Result<()> {
    let mut session = self.session()?;
    let reading = self.cast(&mut session, question).await?;

    let deck = session.deck().context("deck vanished during the reading")?;
    let names: Vec<&str> = reading
      .card_ids
      .iter()
      .filter_map(|&id| deck.get(id).map(|c| c.name.as_str()))
      .collect();
    println!("Cards: {}\n", names.join(", "));
    println!("{}", reading.answer);
    Ok(())
  }

  pub async fn export(
    &self,
    format: export::Format,
    out: &Path,
    question: Option<&str>,
  ) -> anyhow::Result<()> {
    let mut session = self.session()?;
    self.fill_session(&mut session).await?;

    if let Some(question) = question {
      self.cast(&mut session, question).await?;
    }

    let archive = session.archive().map_err(explain)?;
    let generated = Utc::now();
    let body = export::render(&archive, format, generated)?;
    let file = out.join(format!(
      "{}.{}",
      archive.file_stem(generated.timestamp_millis()),
      format.extension()
    ));
    std::fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    std::fs::write(&file, body).with_context(|| format!("failed to write {}", file.display()))?;
    println!(
      "Grimoire written to {} ({}/{} cards inscribed)",
      file.display(),
      archive.completed(),
      archive.cards.len()
    );
    Ok(())
  }

  pub fn prefs(
    &self,
    tradition: Option<Tradition>,
    style: Option<Style>,
    eros: Option<bool>,
  ) -> anyhow::Result<()> {
    let current = self.storage.preferences();
    let updated = Preferences {
      tradition: tradition.unwrap_or(current.tradition),
      style:     style.unwrap_or(current.style),
      eros:      eros.unwrap_or(current.eros),
    };
    if updated != current && !self.storage.save_preferences(&updated) {
      bail!("preferences could not be saved");
    }
    println!("tradition: {}", updated.tradition.name());
    println!("style:     {}", updated.style.name());
    println!("eros:      {}", if updated.eros { "on" } else { "off" });
    Ok(())
  }

  pub fn reset(&self, all: bool) -> anyhow::Result<()> {
    let cleared = if all { self.storage.clear() } else { self.storage.clear_snapshot() };
    if !cleared {
      bail!("the store could not be cleared");
    }
    println!("{}", if all { "Everything forgotten." } else { "Saved deck forgotten." });
    Ok(())
  }
}

fn print_status(snapshot: &Snapshot, now_ms: i64) {
  println!("{}", snapshot.author);
  println!("  {} // {}", snapshot.style.name(), snapshot.tradition.name());
  println!("  {}/{} cards inscribed", snapshot.deck.completed(), snapshot.deck.len());
  println!("  portrait: {}", if snapshot.portrait.is_some() { "yes" } else { "no" });
  println!("  saved {}", humanize_age(now_ms.saturating_sub(snapshot.timestamp)));
}

/// "3 hours ago" style age of an elapsed span in milliseconds.
pub fn humanize_age(elapsed_ms: i64) -> String {
  let minutes = elapsed_ms.max(0) / 60_000;
  let hours = minutes / 60;
  let days = hours / 24;
  let (n, unit) = match (days, hours, minutes) {
    (d, _, _) if d > 0 => (d, "day"),
    (_, h, _) if h > 0 => (h, "hour"),
    (_, _, m) if m > 0 => (m, "minute"),
    _ => return "just now".to_string(),
  };
  format!("{n} {unit}{} ago", if n > 1 { "s" } else { "" })
}
