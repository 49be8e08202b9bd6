//! Error taxonomy shared by every arcana crate.
//!
//! Each variant carries a short summary (its `Display` prefix) and, where the
//! service or the caller supplied one, a detail string for diagnostics.

use thiserror::Error;

use crate::card::CardId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("API key not configured: {0}")]
  MissingCredential(String),

  #[error("rate limit exceeded: {0}")]
  RateLimited(String),

  #[error("API key invalid or expired: {0}")]
  InvalidCredential(String),

  #[error("API request failed: {status}: {detail}")]
  RequestFailed { status: u16, detail: String },

  #[error("invalid API response: {0}")]
  InvalidResponse(String),

  #[error("image generation failed: {0}")]
  ImageGenerationFailed(String),

  #[error("no image in response: {0}")]
  NoImageProduced(String),

  #[error("malformed payload: {0}")]
  MalformedPayload(String),

  #[error("malformed deck response: {0}")]
  MalformedDeckResponse(String),

  #[error("card not found: {0}")]
  CardNotFound(CardId),

  #[error("card {0} does not match the deck entry with the same id")]
  CardMismatch(CardId),

  #[error("no deck has been summoned yet")]
  NoDeck,

  #[error("a spread needs {needed} cards, the deck holds {found}")]
  DeckTooSmall { needed: usize, found: usize },

  #[error("author must not be blank")]
  EmptyAuthor,

  #[error("question must not be blank")]
  EmptyQuestion,

  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Stable machine-readable code for the error kind.
  pub fn code(&self) -> &'static str {
    match self {
      Self::MissingCredential(_) => "MISSING_API_KEY",
      Self::RateLimited(_) => "RATE_LIMIT",
      Self::InvalidCredential(_) => "INVALID_KEY",
      Self::RequestFailed { .. } => "REQUEST_FAILED",
      Self::InvalidResponse(_) => "INVALID_RESPONSE",
      Self::ImageGenerationFailed(_) => "IMAGE_GEN_FAILED",
      Self::NoImageProduced(_) => "NO_IMAGE",
      Self::MalformedPayload(_) => "MALFORMED_PAYLOAD",
      Self::MalformedDeckResponse(_) => "MALFORMED_DECK",
      Self::CardNotFound(_) => "CARD_NOT_FOUND",
      Self::CardMismatch(_) => "CARD_MISMATCH",
      Self::NoDeck => "NO_DECK",
      Self::DeckTooSmall { .. } => "DECK_TOO_SMALL",
      Self::EmptyAuthor => "EMPTY_AUTHOR",
      Self::EmptyQuestion => "EMPTY_QUESTION",
      Self::Transport(_) => "TRANSPORT",
    }
  }

  /// Short human-readable summary, suitable for a dialog title line.
  pub fn summary(&self) -> &'static str {
    match self {
      Self::MissingCredential(_) => "Gemini API key not configured",
      Self::RateLimited(_) => "Rate limit exceeded",
      Self::InvalidCredential(_) => "API key invalid or expired",
      Self::RequestFailed { .. } => "API request failed",
      Self::InvalidResponse(_) => "Invalid API response",
      Self::ImageGenerationFailed(_) => "Image generation failed",
      Self::NoImageProduced(_) => "No image in response",
      Self::MalformedPayload(_) => "Malformed response payload",
      Self::MalformedDeckResponse(_) => "Malformed deck response",
      Self::CardNotFound(_) => "Card not found",
      Self::CardMismatch(_) => "Card does not match deck",
      Self::NoDeck => "No deck summoned",
      Self::DeckTooSmall { .. } => "Deck too small for a spread",
      Self::EmptyAuthor => "Subject required",
      Self::EmptyQuestion => "Question required",
      Self::Transport(_) => "Connection failed",
    }
  }

  /// Optional diagnostic detail.
  pub fn detail(&self) -> Option<&str> {
    match self {
      Self::MissingCredential(d)
      | Self::RateLimited(d)
      | Self::InvalidCredential(d)
      | Self::InvalidResponse(d)
      | Self::ImageGenerationFailed(d)
      | Self::NoImageProduced(d)
      | Self::MalformedPayload(d)
      | Self::MalformedDeckResponse(d) => Some(d),
      Self::RequestFailed { detail, .. } => Some(detail),
      Self::CardNotFound(_)
      | Self::CardMismatch(_)
      | Self::NoDeck
      | Self::DeckTooSmall { .. }
      | Self::EmptyAuthor
      | Self::EmptyQuestion
      | Self::Transport(_) => None,
    }
  }

  /// Errors that cannot succeed on a retry of the same request.
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::MissingCredential(_) | Self::InvalidCredential(_))
  }

  /// A service-reported image failure caused by the content safety filter.
  pub fn is_content_blocked(&self) -> bool {
    match self {
      Self::ImageGenerationFailed(detail) => {
        let detail = detail.to_ascii_lowercase();
        detail.contains("blocked") || detail.contains("safety")
      }
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
