//! Exponential backoff for connection attempts made during startup

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Attempt schedule: the first try plus `retries` more, waiting `initial`
/// before the first retry and doubling the wait up to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub retries: u32,
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            retries: 5,
            initial: Duration::from_millis(200),
            max: Duration::from_secs(5),
        }
    }
}

impl Backoff {
    /// Wait before retry `n`, counting from 1.
    pub fn delay(&self, n: u32) -> Duration {
        let factor = 2u32.saturating_pow(n.saturating_sub(1));
        self.initial.saturating_mul(factor).min(self.max)
    }

    /// Run `operation` until it succeeds or the retries are spent. The error
    /// of the last attempt is returned.
    pub async fn run<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut n = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if n >= self.retries => return Err(e),
                Err(e) => {
                    n += 1;
                    let delay = self.delay(n);
                    warn!(
                        retry = n,
                        retries = self.retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(retries: u32) -> Backoff {
        Backoff {
            retries,
            initial: Duration::from_millis(1),
            max: Duration::from_millis(4),
        }
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let backoff = Backoff::default();
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(2), Duration::from_millis(400));
        assert_eq!(backoff.delay(5), Duration::from_millis(3200));
        assert_eq!(backoff.delay(6), Duration::from_secs(5));
        assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = quick(5)
            .run(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 { Err(format!("refused {n}")) } else { Ok(n) }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = quick(2)
            .run(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(format!("refused {n}"))
            })
            .await;

        assert_eq!(result, Err("refused 2".to_string()));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_no_retries_tries_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = quick(0)
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("down")
            })
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
