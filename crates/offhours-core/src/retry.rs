//! Bounded linear retry around a single remote call.
//!
//! The platform client applies its own standard retry/backoff underneath for
//! throttling; this layer is a second, coarser safety net with a fixed delay.
//! Whether exhaustion is fatal is decided at the call site, not here.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

/// Run `op` up to `attempts` times, sleeping `delay` between attempts.
///
/// `is_retryable` classifies errors: a non-retryable error is returned
/// immediately without consuming further attempts. On exhaustion the last
/// error is returned. Each failed attempt is logged (warn), the terminal
/// failure as error.
pub async fn retry<T, E, F, Fut, C>(
    what: &str,
    attempts: usize,
    delay: Duration,
    is_retryable: C,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
{
    let mut attempt = 1usize;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts && is_retryable(&e) => {
                warn!(what, attempt, error = %e, "remote call failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(what, attempt, error = %e, "remote call failed, giving up");
                return Err(e);
            }
        }
    }
}
