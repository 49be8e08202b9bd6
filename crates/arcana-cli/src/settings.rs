//! Layered configuration: an optional TOML file, then `ARCANA_*` variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use arcana_gemini::{
  GeminiConfig, RetryPolicy,
  client::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL},
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub api_key:        Option<String>,
  pub base_url:       String,
  pub text_model:     String,
  pub image_model:    String,
  pub max_retries:    u32,
  pub retry_delay_ms: u64,
  pub store_path:     PathBuf,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      api_key:        None,
      base_url:       DEFAULT_BASE_URL.to_string(),
      text_model:     DEFAULT_TEXT_MODEL.to_string(),
      image_model:    DEFAULT_IMAGE_MODEL.to_string(),
      max_retries:    3,
      retry_delay_ms: 1000,
      store_path:     PathBuf::from("~/.local/share/arcana/arcana.db"),
    }
  }
}

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ARCANA"))
      .build()
      .context("failed to read config file")?;
    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }

  pub fn gemini(&self) -> GeminiConfig {
    GeminiConfig {
      api_key:     self.api_key.clone(),
      base_url:    self.base_url.clone(),
      text_model:  self.text_model.clone(),
      image_model: self.image_model.clone(),
      retry:       RetryPolicy {
        max_attempts: self.max_retries,
        base_delay:   Duration::from_millis(self.retry_delay_ms),
      },
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/arcana.toml")).unwrap();
    assert_eq!(settings.text_model, DEFAULT_TEXT_MODEL);
    assert_eq!(settings.gemini().retry, RetryPolicy::default());
  }

  #[test]
  fn file_values_override_defaults() {
    let dir = std::env::temp_dir().join(format!("arcana-settings-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("arcana.toml");
    std::fs::write(
      &path,
      "max_retries = 5\nretry_delay_ms = 250\nstore_path = \"/tmp/arcana.db\"\n",
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    let retry = settings.gemini().retry;
    assert_eq!(retry.max_attempts, 5);
    assert_eq!(retry.base_delay, Duration::from_millis(250));
    assert_eq!(settings.store_path, PathBuf::from("/tmp/arcana.db"));
    let _ = std::fs::remove_dir_all(dir);
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/a/~/b")), PathBuf::from("/a/~/b"));
  }
}
