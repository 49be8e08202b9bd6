//! The rites: everything arcana does with a [`Generator`].
//!
//! - [`requesters`] turn a ritual context into prompts and decode the replies.
//! - [`batch`] completes every unfinished card, one call in flight at a time.
//! - [`oracle`] draws a spread and consults the oracle.
//! - [`session`] holds application state and exposes one transition per action.
//!
//! [`Generator`]: arcana_core::generator::Generator

pub mod archive;
pub mod batch;
pub mod oracle;
pub mod prompts;
pub mod requesters;
pub mod session;

pub use archive::Archive;
pub use batch::{FillReport, Progress, SerialRunner, fill_deck};
pub use requesters::RitualContext;
pub use session::Session;

#[cfg(test)]
mod testing;
