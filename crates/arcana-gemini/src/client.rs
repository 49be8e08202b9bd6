//! Async HTTP client for the Gemini text and Imagen image endpoints.

use std::{
  future::Future,
  sync::atomic::{AtomicBool, Ordering},
};

use arcana_core::{Error, Result, generator::Generator};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::{
  retry::{RetryPolicy, retry},
  wire::{ErrorBody, ImageRequest, ImageResponse, TextRequest, TextResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-001";

/// Value shipped in sample configuration files; never a real key.
pub const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// Prefix used when the safety filter rejects an image prompt.
pub const SAFE_DESCRIPTOR: &str = "16-bit pixel art style, mystical tarot card, symbolic imagery";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for the generation service.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
  pub api_key:     Option<String>,
  pub base_url:    String,
  pub text_model:  String,
  pub image_model: String,
  pub retry:       RetryPolicy,
}

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key:     None,
      base_url:    DEFAULT_BASE_URL.to_string(),
      text_model:  DEFAULT_TEXT_MODEL.to_string(),
      image_model: DEFAULT_IMAGE_MODEL.to_string(),
      retry:       RetryPolicy::default(),
    }
  }
}

/// Fail fast unless a usable credential is configured.
pub fn check_credential(api_key: Option<&str>) -> Result<&str> {
  match api_key.map(str::trim) {
    Some(key) if !key.is_empty() && key != PLACEHOLDER_KEY => Ok(key),
    _ => Err(Error::MissingCredential(
      "set ARCANA_API_KEY or api_key in arcana.toml".to_string(),
    )),
  }
}

/// Replacement prompt for a safety-filtered image request.
pub fn simplify_prompt(prompt: &str) -> String {
  let subject = prompt.split(',').next().unwrap_or_default().trim();
  format!("{SAFE_DESCRIPTOR}, {subject}")
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  client: Client,
  config: GeminiConfig,
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = Client::builder()
      .build()
      .map_err(|e| Error::Transport(Box::new(e)))?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &GeminiConfig { &self.config }

  pub fn check_credential(&self) -> Result<&str> {
    check_credential(self.config.api_key.as_deref())
  }

  fn url(&self, model: &str, method: &str) -> String {
    format!(
      "{}/models/{model}:{method}",
      self.config.base_url.trim_end_matches('/')
    )
  }

  /// `POST /models/{text_model}:generateContent`
  pub async fn generate_text(&self, prompt: &str, expect_json: bool) -> Result<serde_json::Value> {
    let key = self.check_credential()?;
    let body = TextRequest::new(prompt, expect_json);

    let this = self;
    let body = &body;
    retry(&self.config.retry, move || async move {
      let text = this.attempt_text(key, body).await?;
      if expect_json {
        parse_json(&text)
      } else {
        Ok(serde_json::Value::String(text))
      }
    })
    .await
  }

  /// `POST /models/{image_model}:generateImages`
  ///
  /// The first safety-filter rejection seen during the call swaps the
  /// prompt for [`simplify_prompt`]; any later attempt keeps the simplified
  /// prompt and never swaps again.
  pub async fn generate_image(&self, prompt: &str) -> Result<String> {
    let key = self.check_credential()?;
    let simplified = simplify_prompt(prompt);
    let swapped = AtomicBool::new(false);

    let this = self;
    let swapped = &swapped;
    let simplified = simplified.as_str();
    retry(&self.config.retry, move || async move {
      if swapped.load(Ordering::Acquire) {
        return this.attempt_image(key, simplified).await;
      }
      match this.attempt_image(key, prompt).await {
        Err(err) if err.is_content_blocked() => {
          swapped.store(true, Ordering::Release);
          warn!(error = %err, "safety filter triggered, trying simplified prompt");
          this.attempt_image(key, simplified).await
        }
        other => other,
      }
    })
    .await
  }

  async fn attempt_text(&self, key: &str, body: &TextRequest<'_>) -> Result<String> {
    let url = self.url(&self.config.text_model, "generateContent");
    debug!(model = %self.config.text_model, "sending text generation request");

    let resp = self
      .client
      .post(&url)
      .query(&[("key", key)])
      .json(body)
      .send()
      .await
      .map_err(|e| Error::Transport(Box::new(e)))?;

    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message);
      return Err(status_error(status, message));
    }

    let parsed: TextResponse = resp
      .json()
      .await
      .map_err(|e| Error::InvalidResponse(format!("undecodable response body: {e}")))?;
    parsed
      .into_first_text()
      .ok_or_else(|| Error::InvalidResponse("No text content in response".to_string()))
  }

  async fn attempt_image(&self, key: &str, prompt: &str) -> Result<String> {
    let url = self.url(&self.config.image_model, "generateImages");
    debug!(model = %self.config.image_model, "sending image generation request");

    let resp = self
      .client
      .post(&url)
      .query(&[("key", key)])
      .json(&ImageRequest::new(prompt))
      .send()
      .await
      .map_err(|e| Error::Transport(Box::new(e)))?;

    let status = resp.status();
    let parsed: ImageResponse = match resp.json().await {
      Ok(parsed) => parsed,
      Err(_) if !status.is_success() => return Err(status_error(status, None)),
      Err(e) => {
        return Err(Error::InvalidResponse(format!("undecodable response body: {e}")));
      }
    };

    if let Some(err) = parsed.error {
      return Err(Error::ImageGenerationFailed(
        err.message.unwrap_or_else(|| "Unknown error".to_string()),
      ));
    }
    if !status.is_success() {
      return Err(status_error(status, None));
    }

    let bytes = parsed.into_first_bytes().ok_or_else(|| {
      Error::NoImageProduced("Image generation returned empty result".to_string())
    })?;
    B64
      .decode(&bytes)
      .map_err(|e| Error::NoImageProduced(format!("image bytes are not valid base64: {e}")))?;
    Ok(format!("data:image/png;base64,{bytes}"))
  }
}

impl Generator for GeminiClient {
  fn generate_text<'a>(
    &'a self,
    prompt: &'a str,
    expect_json: bool,
  ) -> impl Future<Output = Result<serde_json::Value>> + Send + 'a {
    GeminiClient::generate_text(self, prompt, expect_json)
  }

  fn generate_image<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a {
    GeminiClient::generate_image(self, prompt)
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn status_error(status: StatusCode, message: Option<String>) -> Error {
  match status {
    StatusCode::TOO_MANY_REQUESTS => Error::RateLimited(
      message.unwrap_or_else(|| "Please wait a moment before trying again".to_string()),
    ),
    StatusCode::FORBIDDEN => Error::InvalidCredential(
      message.unwrap_or_else(|| "Please check your API key".to_string()),
    ),
    other => Error::RequestFailed {
      status: other.as_u16(),
      detail: message.unwrap_or_else(|| "Unknown error".to_string()),
    },
  }
}

/// Parse model output as JSON, tolerating a surrounding Markdown code fence.
fn parse_json(text: &str) -> Result<serde_json::Value> {
  let trimmed = text.trim();
  let unfenced = trimmed
    .strip_prefix("```json")
    .or_else(|| trimmed.strip_prefix("```"))
    .and_then(|rest| rest.strip_suffix("```"))
    .unwrap_or(trimmed);
  serde_json::from_str(unfenced.trim()).map_err(|e| Error::MalformedPayload(e.to_string()))
}
