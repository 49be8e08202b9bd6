//! Request and response bodies for the two generation endpoints.

use serde::{Deserialize, Serialize};

// ─── generateContent ─────────────────────────────────────────────────────────

pub const TEMPERATURE: f64 = 0.9;
pub const TOP_P: f64 = 0.95;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest<'a> {
  pub contents:          [Content<'a>; 1],
  pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
  pub parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
  pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_mime_type: Option<&'static str>,
  pub temperature:        f64,
  pub top_p:              f64,
}

impl<'a> TextRequest<'a> {
  pub fn new(prompt: &'a str, expect_json: bool) -> Self {
    Self {
      contents:          [Content { parts: [Part { text: prompt }] }],
      generation_config: GenerationConfig {
        response_mime_type: expect_json.then_some("application/json"),
        temperature:        TEMPERATURE,
        top_p:              TOP_P,
      },
    }
  }
}

#[derive(Debug, Default, Deserialize)]
pub struct TextResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
  text: Option<String>,
}

impl TextResponse {
  /// Text of the first part of the first candidate, if non-empty.
  pub fn into_first_text(self) -> Option<String> {
    self
      .candidates
      .into_iter()
      .next()?
      .content?
      .parts
      .into_iter()
      .next()?
      .text
      .filter(|t| !t.trim().is_empty())
  }
}

// ─── generateImages ──────────────────────────────────────────────────────────

pub const ASPECT_RATIO: &str = "3:4";
pub const SAFETY_FILTER_LEVEL: &str = "block_some";
pub const PERSON_GENERATION: &str = "allow_adult";

#[derive(Debug, Serialize)]
pub struct ImageRequest<'a> {
  pub prompt:              &'a str,
  pub number_of_images:    u8,
  pub aspect_ratio:        &'static str,
  pub safety_filter_level: &'static str,
  pub person_generation:   &'static str,
}

impl<'a> ImageRequest<'a> {
  pub fn new(prompt: &'a str) -> Self {
    Self {
      prompt,
      number_of_images: 1,
      aspect_ratio: ASPECT_RATIO,
      safety_filter_level: SAFETY_FILTER_LEVEL,
      person_generation: PERSON_GENERATION,
    }
  }
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageResponse {
  pub error:        Option<ErrorDetail>,
  #[serde(default)]
  generated_images: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
  image: Option<ImageBytes>,
}

#[derive(Debug, Deserialize)]
struct ImageBytes {
  image_bytes: Option<String>,
}

impl ImageResponse {
  /// Base64 bytes of the first generated image, if non-empty.
  pub fn into_first_bytes(self) -> Option<String> {
    self
      .generated_images
      .into_iter()
      .next()?
      .image?
      .image_bytes
      .filter(|b| !b.is_empty())
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
  pub error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorDetail {
  pub message: Option<String>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn text_request_shape() {
    let json = serde_json::to_value(TextRequest::new("hello", true)).unwrap();
    assert_eq!(
      json,
      json!({
        "contents": [{ "parts": [{ "text": "hello" }] }],
        "generationConfig": {
          "responseMimeType": "application/json",
          "temperature": 0.9,
          "topP": 0.95
        }
      })
    );

    let plain = serde_json::to_value(TextRequest::new("hello", false)).unwrap();
    assert!(plain["generationConfig"].get("responseMimeType").is_none());
  }

  #[test]
  fn image_request_shape() {
    let json = serde_json::to_value(ImageRequest::new("a tower")).unwrap();
    assert_eq!(
      json,
      json!({
        "prompt": "a tower",
        "number_of_images": 1,
        "aspect_ratio": "3:4",
        "safety_filter_level": "block_some",
        "person_generation": "allow_adult"
      })
    );
  }

  #[test]
  fn missing_text_yields_none() {
    let empty: TextResponse = serde_json::from_value(json!({})).unwrap();
    assert!(empty.into_first_text().is_none());

    let no_parts: TextResponse =
      serde_json::from_value(json!({ "candidates": [{ "content": { "parts": [] } }] })).unwrap();
    assert!(no_parts.into_first_text().is_none());
  }
}
