//! Archive renderers: pretty JSON, or a self-contained HTML grimoire.

use std::fmt::Write as _;

use arcana_core::card::{Card, CardMeta};
use arcana_rites::Archive;
use chrono::{DateTime, Utc};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
  #[default]
  Html,
  Json,
}

impl Format {
  pub fn extension(self) -> &'static str {
    match self {
      Format::Html => "html",
      Format::Json => "json",
    }
  }
}

pub fn render(archive: &Archive, format: Format, generated: DateTime<Utc>) -> anyhow::Result<String> {
  Ok(match format {
    Format::Json => serde_json::to_string_pretty(archive)?,
    Format::Html => render_html(archive, generated),
  })
}

// ─── HTML ────────────────────────────────────────────────────────────────────

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { background: #1a0b2e; color: #ffd700; font-family: 'Courier New', monospace;
           padding: 40px 20px; max-width: 900px; margin: 0 auto; line-height: 1.6; }
    h1, h2, h3 { border-bottom: 3px solid #ffd700; padding-bottom: 12px;
                 text-transform: uppercase; letter-spacing: 2px; }
    h1 { font-size: 3em; text-align: center; margin-bottom: 10px; text-shadow: 4px 4px 0 #000; }
    .header { text-align: center; margin-bottom: 60px; padding-bottom: 40px; border-bottom: 4px solid #ffd700; }
    .portrait { max-width: 400px; border: 6px solid #ffd700; image-rendering: pixelated;
                display: block; margin: 30px auto; }
    .dossier, .card { background: rgba(0, 0, 0, 0.3); border: 3px solid #ffd700; padding: 30px; margin: 40px 0; }
    .oracle { background: rgba(45, 27, 78, 0.4); border: 3px solid #9b59b6; padding: 30px; margin: 40px 0; }
    .oracle h2 { border-bottom-color: #9b59b6; color: #9b59b6; }
    .card img, .placeholder { max-width: 100%; max-height: 500px; border: 4px solid #ffd700;
                              image-rendering: pixelated; display: block; margin: 20px auto; }
    .placeholder { padding: 40px; text-align: center; opacity: 0.5; }
    .meta { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px;
            border-top: 2px solid #555; padding-top: 20px; }
    .meta div { border: 1px solid rgba(255, 215, 0, 0.2); padding: 12px; font-size: 0.9em; }
    .meta strong { display: block; text-transform: uppercase; font-size: 0.8em; opacity: 0.7; }
    .footer { text-align: center; margin-top: 80px; border-top: 2px solid #ffd700; opacity: 0.6; }
    @media print { body { background: white; color: black; } .card { page-break-inside: avoid; } }
"#;

pub fn render_html(archive: &Archive, generated: DateTime<Utc>) -> String {
  let author = escape(&archive.author);
  let mut out = String::with_capacity(64 * 1024);

  // Writing into a String cannot fail.
  let _ = write!(
    out,
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  \
     <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
     <title>{author} - Grimoire</title>\n  <style>{STYLE}  </style>\n</head>\n<body>\n"
  );
  let _ = write!(
    out,
    "  <div class=\"header\">\n    <h1>{author}</h1>\n    <p>{} // {}</p>\n    <p>Generated: {}</p>\n  </div>\n",
    escape(archive.style.name()),
    escape(archive.tradition.name()),
    generated.format("%B %-d, %Y"),
  );
  if let Some(portrait) = &archive.portrait {
    let _ = writeln!(
      out,
      "  <img class=\"portrait\" src=\"{}\" alt=\"{author} portrait\" />",
      escape(portrait)
    );
  }
  let _ = write!(
    out,
    "  <h2>Dossier</h2>\n  <div class=\"dossier\"><p>{}</p></div>\n",
    escape(&archive.dossier)
  );

  if let Some(reading) = &archive.reading {
    let _ = write!(
      out,
      "  <div class=\"oracle\">\n    <h2>Oracle Reading</h2>\n    <p><strong>Question:</strong> {}</p>\n    \
       <p><strong>Cards:</strong> {}</p>\n    <p>{}</p>\n  </div>\n",
      escape(&reading.question),
      escape(&reading.cards.join(", ")),
      escape(&reading.answer),
    );
  }

  let _ = writeln!(out, "  <h2>Arcanum ({} Cards)</h2>", archive.cards.len());
  for card in &archive.cards {
    render_card(&mut out, card);
  }

  let _ = write!(
    out,
    "  <div class=\"footer\"><p>Arcana grimoire</p><p>{}</p></div>\n</body>\n</html>\n",
    generated.format("%Y")
  );
  out
}

fn render_card(out: &mut String, card: &Card) {
  let name = escape(&card.name);
  let arcanum = card.arcanum().map(|a| a.to_string()).unwrap_or_default();
  let _ = write!(out, "  <div class=\"card\">\n    <h3>{name}</h3>\n    <p>{arcanum}</p>\n");
  match &card.image_url {
    Some(url) => {
      let _ = writeln!(out, "    <img src=\"{}\" alt=\"{name}\" />", escape(url));
    }
    None => out.push_str("    <div class=\"placeholder\">Image not generated</div>\n"),
  }
  let exegesis = card.exegesis.as_deref().map_or_else(|| "Exegesis not inscribed.".into(), escape);
  let _ = writeln!(out, "    <p>{exegesis}</p>");
  if let Some(meta) = &card.meta {
    render_meta(out, meta);
  }
  out.push_str("  </div>\n");
}

fn render_meta(out: &mut String, meta: &CardMeta) {
  out.push_str("    <div class=\"meta\">\n");
  let gematria = meta.gematria.to_string();
  let rows = [
    ("hebrew", meta.hebrew.as_deref().unwrap_or("none")),
    ("planet", meta.planet.as_str()),
    ("alchemical", meta.alchemical.as_str()),
    ("daimon", meta.daimon.as_str()),
    ("gematria", gematria.as_str()),
  ];
  for (key, value) in rows {
    let _ = writeln!(out, "      <div><strong>{key}</strong> {}</div>", escape(value));
  }
  out.push_str("    </div>\n");
}

/// Escape text for HTML content and double-quoted attribute values.
pub fn escape(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}
