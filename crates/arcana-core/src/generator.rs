//! The `Generator` trait: the seam between the rites and the generative
//! service.
//!
//! The trait is implemented by service clients (e.g. `arcana-gemini`). The
//! requesters, the batch workflow and the session depend on this abstraction,
//! not on any concrete client.

use std::future::Future;

use crate::Result;

/// Abstraction over a text + image generation backend.
///
/// All methods return `Send` futures so generations can be driven from a
/// multi-threaded tokio runtime.
pub trait Generator: Send + Sync {
  /// Generate text for `prompt`.
  ///
  /// With `expect_json` the backend asks for a JSON-typed response and returns
  /// the parsed value; otherwise the raw text is returned as a JSON string.
  fn generate_text<'a>(
    &'a self,
    prompt: &'a str,
    expect_json: bool,
  ) -> impl Future<Output = Result<serde_json::Value>> + Send + 'a;

  /// Generate a single image for `prompt` and return a data URI or URL.
  fn generate_image<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a;
}
