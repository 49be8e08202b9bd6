//! `arcana`: summon, complete and consult generated tarot decks.
//!
//! # Usage
//!
//! ```
//! arcana ritual --author "Hildegard of Bingen" --style medieval
//! arcana fill
//! arcana oracle "What am I not seeing?"
//! arcana export --format html
//! ```
//!
//! Settings come from `arcana.toml` (or `--config`), then `ARCANA_*`
//! environment variables, e.g. `ARCANA_API_KEY`.

mod app;
mod export;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use arcana_core::{
  card::CardId,
  catalog::{Style, Tradition},
};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{app::App, export::Format, settings::Settings};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "arcana", version, about = "Generated tarot decks")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "arcana.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Verify that a usable API key is configured.
  Check,
  /// List the traditions and visual styles.
  Catalog,
  /// Summon a new deck, dossier and portrait for an author.
  Ritual {
    #[arg(short, long)]
    author:    String,
    /// Tradition id; defaults to the saved preference.
    #[arg(short, long)]
    tradition: Option<Tradition>,
    /// Style id; defaults to the saved preference.
    #[arg(short, long)]
    style:     Option<Style>,
    /// Content mode.
    #[arg(long)]
    eros:      Option<bool>,
  },
  /// Show the saved deck.
  Status,
  /// Complete a single card.
  Forge { id: CardId },
  /// Complete every unfinished card, one at a time.
  Fill,
  /// Draw three cards and ask the oracle.
  Oracle { question: String },
  /// Write the grimoire, completing missing cards first.
  Export {
    #[arg(short, long, value_enum, default_value_t)]
    format:   Format,
    /// Output directory.
    #[arg(short, long, default_value = ".")]
    out:      PathBuf,
    /// Cast a reading to include in the grimoire.
    #[arg(short, long)]
    question: Option<String>,
  },
  /// Show or change the defaults used by `ritual`.
  Prefs {
    #[arg(short, long)]
    tradition: Option<Tradition>,
    #[arg(short, long)]
    style:     Option<Style>,
    #[arg(long)]
    eros:      Option<bool>,
  },
  /// Forget the saved deck. With `--all`, forget everything.
  Reset {
    #[arg(long)]
    all: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let app = App::open(settings).context("failed to start arcana")?;
  app.greet();

  match cli.command {
    Command::Check => app.check(),
    Command::Catalog => {
      app.catalog();
      Ok(())
    }
    Command::Ritual { author, tradition, style, eros } => {
      app.ritual(&author, tradition, style, eros).await
    }
    Command::Status => app.status(),
    Command::Forge { id } => app.forge(id).await,
    Command::Fill => app.fill().await,
    Command::Oracle { question } => app.oracle(&question).await,
    Command::Export { format, out, question } => app.export(format, &out, question.as_deref()).await,
    Command::Prefs { tradition, style, eros } => app.prefs(tradition, style, eros),
    Command::Reset { all } => app.reset(all),
  }
}
