//! Traditions and visual styles a deck can be summoned in.
//!
//! Both only influence prompt phrasing. Ids are the snake_case variant names;
//! they are what gets persisted and what the CLI accepts.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

// ─── Traditions ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tradition {
  #[default]
  Thoth,
  Rws,
  Marseille,
  Hermetic,
  Shadow,
}

impl Tradition {
  pub fn id(self) -> &'static str { self.into() }

  pub fn name(self) -> &'static str {
    match self {
      Self::Thoth => "Book of Thoth",
      Self::Rws => "Rider-Waite-Smith",
      Self::Marseille => "Tarot de Marseille",
      Self::Hermetic => "Hermetic Qabalah",
      Self::Shadow => "Jungian Shadow",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Self::Thoth => "Crowley & Harris - High Magick",
      Self::Rws => "Golden Dawn Standard",
      Self::Marseille => "Traditional Iconography",
      Self::Hermetic => "Tree of Life & Pathworking",
      Self::Shadow => "Depth Psychology",
    }
  }
}

// ─── Styles ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleCategory {
  Classical,
  Esoteric,
  Retro,
  Modern,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Style {
  RenAllegory,
  Baroque,
  Dore,
  Medieval,
  Hermetic,
  Crowley,
  Spare,
  #[default]
  Pixel,
  Zelda,
  Metroid,
  Earthbound,
  Souls,
  Blasphemous,
  Chrono,
  Cyber,
  Vapor,
  Eldritch,
  Glitch,
  Fractal,
  SacredEros,
}

impl Style {
  pub fn id(self) -> &'static str { self.into() }

  pub fn name(self) -> &'static str {
    match self {
      Self::RenAllegory => "Renaissance Allegory",
      Self::Baroque => "High Baroque",
      Self::Dore => "Gustave Doré",
      Self::Medieval => "Illuminated Manuscript",
      Self::Hermetic => "Hermetic Alchemical",
      Self::Crowley => "Thelemic / Crowley",
      Self::Spare => "Austin Osman Spare",
      Self::Pixel => "16-Bit Sovereign",
      Self::Zelda => "Hylian Legend",
      Self::Metroid => "Biome Alien",
      Self::Earthbound => "Psychedelic RPG",
      Self::Souls => "Dark Souls Pixel",
      Self::Blasphemous => "Penitent One",
      Self::Chrono => "Time Trigger",
      Self::Cyber => "Cyber-Occult",
      Self::Vapor => "Vaporwave 95",
      Self::Eldritch => "Cosmic Horror",
      Self::Glitch => "Glitch Occultism",
      Self::Fractal => "Fractal Geometry",
      Self::SacredEros => "Sacred Eros",
    }
  }

  pub fn category(self) -> StyleCategory {
    match self {
      Self::RenAllegory | Self::Baroque | Self::Dore | Self::Medieval => {
        StyleCategory::Classical
      }
      Self::Hermetic | Self::Crowley | Self::Spare | Self::SacredEros => {
        StyleCategory::Esoteric
      }
      Self::Pixel
      | Self::Zelda
      | Self::Metroid
      | Self::Earthbound
      | Self::Souls
      | Self::Blasphemous
      | Self::Chrono => StyleCategory::Retro,
      Self::Cyber | Self::Vapor | Self::Eldritch | Self::Glitch | Self::Fractal => {
        StyleCategory::Modern
      }
    }
  }

  /// Image-prompt fragment describing the aesthetic.
  pub fn prompt(self) -> &'static str {
    match self {
      Self::RenAllegory => {
        "Renaissance allegorical painting style with idealized human proportions, divine geometry, soft natural light, balanced symmetry, classical drapery, calm sacred expressions, timeless mythic realism."
      }
      Self::Baroque => {
        "High Baroque mystical painting style with dramatic chiaroscuro lighting, deep shadows, radiant illumination, emotional intensity, sacred drama, fate-laden atmosphere."
      }
      Self::Dore => {
        "Monochrome engraved illustration style with epic scale, apocalyptic symbolism, biblical gravity, dramatic contrasts, towering mythic figures, visionary intensity."
      }
      Self::Medieval => {
        "Medieval illuminated manuscript style with flat sacred perspective, symbolic hierarchy, gold accents, ornamental patterns, devotional clarity."
      }
      Self::Hermetic => {
        "Hermetic alchemical illustration style with symbolic vessels, celestial correspondences, allegorical figures, sacred geometry, arcane manuscript aesthetics."
      }
      Self::Crowley => {
        "Modern occult symbolism style with bold color fields, abstract sacred forms, erotic mysticism, magical intensity, ritual power."
      }
      Self::Spare => {
        "Automatic drawing style with sigil-like linework, subconscious symbolism, raw gestural marks, chaotic yet intentional forms."
      }
      Self::Pixel => {
        "16-bit pixel art masterpiece, SNES RPG style, deep color palette, isometric perspective, magical aura, detailed sprite work."
      }
      Self::Zelda => {
        "Fantasy rpg style, cel-shaded pixel art, bright magical colors, golden triangles, ancient ruins, forest atmosphere."
      }
      Self::Metroid => {
        "Sci-fi horror pixel art, Metroid aesthetic, dark alien biology, neon greens and deep blacks, claustrophobic atmosphere."
      }
      Self::Earthbound => {
        "Earthbound style, trippy pixel art, abstract backgrounds, vibrant distorted colors, surreal enemies, quirkiness."
      }
      Self::Souls => {
        "Dark fantasy pixel art, decaying kingdom, bonfire lighting, heavy armor, muted colors, melancholy atmosphere."
      }
      Self::Blasphemous => {
        "Spanish religious horror pixel art, Blasphemous style, intricate gore, gold ornamentation, suffering, high contrast."
      }
      Self::Chrono => {
        "90s JRPG masterpiece style, vibrant character sprites, time travel visual effects, steampunk elements, Akira Toriyama influence."
      }
      Self::Cyber => {
        "Cyberpunk tarot card, neon green and purple, glitch artifacts, CRT monitor texture, digital deity, high tech mysticism."
      }
      Self::Vapor => {
        "Vaporwave aesthetic, pixelated greek statues, windows 95 UI elements, pastel pink and teal, surreal digital void."
      }
      Self::Eldritch => {
        "Lovecraftian pixel art, forbidden colors, non-euclidean geometry, madness, dithering darkness, tentacle motifs."
      }
      Self::Glitch => {
        "Digital glitch occult style with corrupted symbols, ritual error, broken reality aesthetics."
      }
      Self::Fractal => {
        "Fractal geometry style with infinite recursion, sacred mathematics, archetypal emergence."
      }
      Self::SacredEros => {
        "Sacred geometry fused with subtle erotic mysticism, divine sensuality, spiritual embodiment, ritual intimacy."
      }
    }
  }
}
