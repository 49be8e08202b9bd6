//! Batch fill-in: complete every unfinished card of a deck.
//!
//! Cards are forged strictly one at a time in ascending id order. A failed
//! card is logged and left as it was; the batch itself never fails.

use std::collections::VecDeque;

use arcana_core::{card::CardId, deck::Deck, generator::Generator};
use tracing::{error, info};

use crate::requesters::{RitualContext, forge_card};

/// Reported after every attempt, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
  pub completed: usize,
  pub total:     usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
  pub forged: Vec<CardId>,
  pub failed: Vec<CardId>,
}

impl FillReport {
  pub fn attempted(&self) -> usize { self.forged.len() + self.failed.len() }
}

/// Single-slot job queue: jobs are handed out one at a time, and the next is
/// only available once the previous has been finished.
#[derive(Debug)]
pub struct SerialRunner<J> {
  pending:   VecDeque<J>,
  in_flight: bool,
  total:     usize,
  finished:  usize,
}

impl<J> SerialRunner<J> {
  pub fn new(jobs: impl IntoIterator<Item = J>) -> Self {
    let pending: VecDeque<J> = jobs.into_iter().collect();
    Self { total: pending.len(), pending, in_flight: false, finished: 0 }
  }

  /// The next job, or `None` while one is in flight or when the queue is drained.
  pub fn start(&mut self) -> Option<J> {
    if self.in_flight {
      return None;
    }
    let job = self.pending.pop_front()?;
    self.in_flight = true;
    Some(job)
  }

  /// Mark the in-flight job finished and report progress.
  pub fn finish(&mut self) -> Progress {
    if self.in_flight {
      self.in_flight = false;
      self.finished += 1;
    }
    self.progress()
  }

  pub fn progress(&self) -> Progress { Progress { completed: self.finished, total: self.total } }

  pub fn is_idle(&self) -> bool { !self.in_flight && self.pending.is_empty() }
}

/// Forge every incomplete card of `deck`, merging each success in place.
///
/// `progress` sees the deck as it stands after each attempt.
pub async fn fill_deck<G: Generator>(
  generator: &G,
  ctx: &RitualContext,
  deck: &mut Deck,
  mut progress: impl FnMut(Progress, &Deck),
) -> FillReport {
  let mut runner = SerialRunner::new(deck.incomplete_ids());
  let mut report = FillReport::default();
  info!(pending = runner.progress().total, "filling deck");

  while let Some(id) = runner.start() {
    let outcome = match deck.get(id) {
      Some(card) => forge_card(generator, ctx, card).await,
      None => Err(arcana_core::Error::CardNotFound(id)),
    };
    match outcome.and_then(|card| deck.replace(card)) {
      Ok(()) => report.forged.push(id),
      Err(e) => {
        error!(card = id, code = e.code(), error = %e, "failed to generate card");
        report.failed.push(id);
      }
    }
    progress(runner.finish(), deck);
  }

  info!(forged = report.forged.len(), failed = report.failed.len(), "deck fill finished");
  report
}
