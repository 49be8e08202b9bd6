//! Retry with exponential backoff.
//!
//! The n-th failed attempt is followed by a delay of `base_delay * 2^(n-1)`.
//! There is no jitter and no cap; the delay is bounded only by
//! `max_attempts`. Terminal errors are returned without retrying.

use std::{fmt, future::Future, time::Duration};

use tracing::warn;

/// Classifies whether an error is worth another attempt.
pub trait Retryable {
  fn is_retryable(&self) -> bool;
}

impl Retryable for arcana_core::Error {
  fn is_retryable(&self) -> bool { !self.is_terminal() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Total attempts, including the first. Zero behaves like one.
  pub max_attempts: u32,
  pub base_delay:   Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      base_delay:   Duration::from_millis(1000),
    }
  }
}

impl RetryPolicy {
  /// Delay slept after the `failed_attempt`-th failure (1-based).
  pub fn delay_for(&self, failed_attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(failed_attempt.saturating_sub(1));
    self.base_delay.saturating_mul(factor)
  }
}

/// Run `op` until it succeeds, fails terminally, or exhausts the policy.
///
/// The last error is returned unchanged.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = Result<T, E>>,
  E: Retryable + fmt::Display,
{
  let max_attempts = policy.max_attempts.max(1);
  let mut attempt = 1;
  loop {
    match op().await {
      Ok(value) => return Ok(value),
      Err(err) if attempt >= max_attempts || !err.is_retryable() => return Err(err),
      Err(err) => {
        let delay = policy.delay_for(attempt);
        warn!(
          attempt,
          max_attempts,
          delay_ms = delay.as_millis() as u64,
          error = %err,
          "attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use arcana_core::Error;
  use tokio::time::Instant;

  use super::*;

  const D: Duration = Duration::from_millis(1000);

  #[derive(Debug, PartialEq, Eq)]
  struct Flaky(u32);

  impl fmt::Display for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "flaky #{}", self.0) }
  }

  impl Retryable for Flaky {
    fn is_retryable(&self) -> bool { true }
  }

  fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
      max_attempts,
      base_delay: D,
    }
  }

  fn gaps(stamps: &[Instant]) -> Vec<Duration> {
    stamps.windows(2).map(|w| w[1] - w[0]).collect()
  }

  #[tokio::test(start_paused = true)]
  async fn succeeds_after_failures_with_doubling_delays() {
    for failures in 1..=5u32 {
      let mut stamps = Vec::new();
      let mut calls = 0u32;

      let result = retry(&policy(failures + 1), || {
        stamps.push(Instant::now());
        let n = calls;
        calls += 1;
        async move { if n < failures { Err(Flaky(n)) } else { Ok(n) } }
      })
      .await;

      assert_eq!(result, Ok(failures));
      let expected: Vec<Duration> = (0..failures).map(|i| D * 2u32.pow(i)).collect();
      assert_eq!(gaps(&stamps), expected);
    }
  }

  #[tokio::test(start_paused = true)]
  async fn exhaustion_returns_last_error_unchanged() {
    for bound in 1..=4u32 {
      let mut stamps = Vec::new();
      let mut calls = 0u32;

      let result: Result<(), Flaky> = retry(&policy(bound), || {
        stamps.push(Instant::now());
        let n = calls;
        calls += 1;
        async move { Err(Flaky(n)) }
      })
      .await;

      assert_eq!(result, Err(Flaky(bound - 1)));
      assert_eq!(stamps.len(), bound as usize);
      assert_eq!(gaps(&stamps).len(), bound as usize - 1);
    }
  }

  #[tokio::test(start_paused = true)]
  async fn first_success_short_circuits() {
    let start = Instant::now();
    let mut calls = 0;
    let result: Result<&str, Flaky> = retry(&policy(3), || {
      calls += 1;
      async { Ok("done") }
    })
    .await;
    assert_eq!(result, Ok("done"));
    assert_eq!(calls, 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
  }

  #[tokio::test(start_paused = true)]
  async fn terminal_errors_skip_the_retry_budget() {
    let mut calls = 0;
    let result: Result<(), Error> = retry(&policy(3), || {
      calls += 1;
      async { Err(Error::InvalidCredential("check your key".into())) }
    })
    .await;
    assert!(matches!(result, Err(Error::InvalidCredential(d)) if d == "check your key"));
    assert_eq!(calls, 1);
  }

  #[tokio::test(start_paused = true)]
  async fn service_errors_keep_kind_and_detail() {
    let mut calls = 0;
    let result: Result<(), Error> = retry(&policy(3), || {
      calls += 1;
      let n = calls;
      async move {
        Err(Error::RequestFailed {
          status: 503,
          detail: format!("overloaded {n}"),
        })
      }
    })
    .await;
    assert_eq!(calls, 3);
    assert!(matches!(
      result,
      Err(Error::RequestFailed { status: 503, detail }) if detail == "overloaded 3"
    ));
  }

  #[test]
  fn zero_attempts_behaves_like_one() {
    let p = policy(0);
    assert_eq!(p.max_attempts.max(1), 1);
    assert_eq!(p.delay_for(1), D);
    assert_eq!(p.delay_for(3), D * 4);
  }
}
