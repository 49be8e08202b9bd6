//! Gemini / Imagen generation client for arcana.
//!
//! Two endpoints, one structured-text model and one image model, both called
//! through the [`retry`] executor. Service failures are mapped into the
//! [`arcana_core::Error`] taxonomy.

pub mod client;
pub mod retry;
mod wire;

pub use client::{GeminiClient, GeminiConfig, check_credential};
pub use retry::{RetryPolicy, Retryable, retry};
