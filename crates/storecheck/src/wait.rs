//! Bounded-wait helpers
//!
//! A bounded wait polls a condition at a fixed interval up to a timeout.
//! It either observes the condition or returns within the bound; it never
//! hangs, and it never substitutes a fixed sleep for an observable state.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Polls `probe` every `interval` until it yields a value or `timeout`
/// elapses.
///
/// Returns `Ok(None)` when the bound is exhausted without a value; the
/// caller decides whether absence is an error. Probe failures propagate
/// immediately.
pub async fn poll_for<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();

    loop {
        if let Some(value) = probe().await? {
            return Ok(Some(value));
        }

        if start.elapsed() >= timeout {
            return Ok(None);
        }

        tokio::time::sleep(interval).await;
    }
}

/// Polls a boolean `probe` every `interval` until it holds, failing with
/// [`Error::WaitTimeout`] naming `what` once `timeout` elapses.
pub async fn wait_until<F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let observed = poll_for(timeout, interval, || {
        let check = probe();
        async move { Ok(check.await?.then_some(())) }
    })
    .await?;

    match observed {
        Some(()) => Ok(()),
        None => Err(Error::WaitTimeout {
            what: what.to_string(),
            timeout,
        }),
    }
}
