//! Core types and trait definitions for arcana.
//!
//! The deck model, the tradition and style catalogues, the error taxonomy and
//! the [`Generator`](generator::Generator) seam. No HTTP, no database.

pub mod card;
pub mod catalog;
pub mod deck;
pub mod error;
pub mod generator;
pub mod reading;
pub mod snapshot;

pub use error::{Error, Result};
