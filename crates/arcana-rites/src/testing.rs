//! A scripted [`Generator`] for exercising the rites without a network.

use std::{future::Future, sync::Mutex};

use arcana_core::{Error, Result, card::DECK_SIZE, generator::Generator};
use serde_json::{Value, json};

pub fn deck_names() -> Vec<String> { (0..DECK_SIZE).map(|i| format!("Card {i}")).collect() }

/// Answers every prompt kind with well-formed content unless told otherwise.
///
/// Failures are keyed on substrings of the prompt, so a test can fail exactly
/// one card by matching its quoted name.
pub struct FakeGenerator {
  deck:           Value,
  card_detail:    Option<Value>,
  text_failures:  Vec<String>,
  image_failures: Vec<String>,
  text_calls:     Mutex<Vec<String>>,
  image_calls:    Mutex<Vec<String>>,
}

impl FakeGenerator {
  pub fn new() -> Self {
    Self {
      deck:           json!({ "dossier": "A mind that wove numbers into looms.", "cards": deck_names() }),
      card_detail:    None,
      text_failures:  Vec::new(),
      image_failures: Vec::new(),
      text_calls:     Mutex::new(Vec::new()),
      image_calls:    Mutex::new(Vec::new()),
    }
  }

  pub fn with_deck(mut self, deck: Value) -> Self {
    self.deck = deck;
    self
  }

  pub fn with_card_detail(mut self, detail: Value) -> Self {
    self.card_detail = Some(detail);
    self
  }

  pub fn failing_text(mut self, needle: &str) -> Self {
    self.text_failures.push(needle.to_owned());
    self
  }

  pub fn failing_image(mut self, needle: &str) -> Self {
    self.image_failures.push(needle.to_owned());
    self
  }

  pub fn text_prompts(&self) -> Vec<String> { self.text_calls.lock().unwrap().clone() }

  pub fn image_prompts(&self) -> Vec<String> { self.image_calls.lock().unwrap().clone() }

  fn text(&self, prompt: &str) -> Result<Value> {
    self.text_calls.lock().unwrap().push(prompt.to_owned());
    if self.text_failures.iter().any(|n| prompt.contains(n.as_str())) {
      return Err(Error::RequestFailed { status: 500, detail: "scripted failure".into() });
    }

    if prompt.contains("\"dossier\"") {
      Ok(self.deck.clone())
    } else if prompt.contains("\"exegesis\"") {
      if let Some(detail) = &self.card_detail {
        return Ok(detail.clone());
      }
      let name = quoted_after(prompt, "tarot card \"").unwrap_or("unknown");
      Ok(json!({
        "exegesis": format!("exegesis of {name}"),
        "meta": {
          "hebrew": null,
          "planet": "Saturn",
          "alchemical": "Nigredo",
          "daimon": "Agiel",
          "gematria": 45
        },
        "visual": format!("visual for {name}")
      }))
    } else if prompt.contains("\"answer\"") {
      let question = quoted_after(prompt, "Question: \"").unwrap_or("");
      Ok(json!({ "answer": format!("The answer to \"{question}\"") }))
    } else {
      Ok(Value::String("unscripted".into()))
    }
  }

  fn image(&self, prompt: &str) -> Result<String> {
    self.image_calls.lock().unwrap().push(prompt.to_owned());
    if self.image_failures.iter().any(|n| prompt.contains(n.as_str())) {
      return Err(Error::ImageGenerationFailed("scripted failure".into()));
    }
    Ok("data:image/png;base64,iVBORw0KGgo=".into())
  }
}

fn quoted_after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
  let start = haystack.find(marker)? + marker.len();
  let len = haystack[start..].find('"')?;
  Some(&haystack[start..start + len])
}

impl Generator for FakeGenerator {
  fn generate_text<'a>(
    &'a self,
    prompt: &'a str,
    _expect_json: bool,
  ) -> impl Future<Output = Result<Value>> + Send + 'a {
    async move { self.text(prompt) }
  }

  fn generate_image<'a>(&'a self, prompt: &'a str) -> impl Future<Output = Result<String>> + Send + 'a {
    async move { self.image(prompt) }
  }
}
