// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Retry and pacing policies for calls to external APIs.
//!
//! The reconciliation core never retries. API clients wrap each request in a
//! [`RetryPolicy`] so the core only sees success or a terminal failure, and
//! write-heavy passes space their writes through a [`WritePacer`].

use crate::config::Config;
use crate::error::{AppError, Result};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Exponential backoff over retryable errors.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.retry_max_attempts, config.retry_initial_delay)
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        if retry == 0 || self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let factor = self.multiplier.powi(exponent);
        let secs = self.initial_delay.as_secs_f64() * factor;
        let max_secs = self.max_delay.as_secs_f64();
        if !secs.is_finite() || secs >= max_secs {
            return self.max_delay;
        }
        Duration::from_secs_f64(secs)
    }

    /// Run `op` until it succeeds, fails terminally, or attempts run out.
    pub async fn run<T, F, Fut>(&self, operation: &str, op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_if(operation, AppError::is_retryable, op).await
    }

    /// Like [`run`](Self::run), but only errors accepted by `should_retry`
    /// are retried.
    pub async fn run_if<T, F, Fut>(
        &self,
        operation: &str,
        should_retry: fn(&AppError) -> bool,
        mut op: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if should_retry(&e) && attempt < self.max_attempts => {
                    let mut delay = self.delay_for(attempt);
                    if let Some(advertised) = e.retry_after() {
                        delay = delay.max(advertised);
                    }
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying after transient failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Enforces a minimum interval between paced writes.
///
/// Acts as a single-token bucket: the first call passes immediately, each
/// later call waits until `interval` has elapsed since the previous one.
#[derive(Debug)]
pub struct WritePacer {
    interval: Duration,
    last_write: Mutex<Option<Instant>>,
}

impl WritePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_write: Mutex::new(None),
        }
    }

    /// Pacer that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Wait for the next write slot and claim it.
    pub async fn pace(&self) {
        if self.interval.is_zero() {
            return;
        }

        let wait = {
            let last = self.last_write.lock().unwrap_or_else(|e| e.into_inner());
            last.map(|t| (t + self.interval).saturating_duration_since(Instant::now()))
        };
        if let Some(wait) = wait.filter(|w| !w.is_zero()) {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "Pacing write");
            tokio::time::sleep(wait).await;
        }

        *self.last_write.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Service;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> AppError {
        AppError::Transient {
            service: Service::Notion,
            message: "connection reset".to_string(),
        }
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300));
        assert_eq!(policy.delay_for(0), Duration::ZERO);
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(300));
        assert_eq!(policy.delay_for(4), Duration::from_millis(300));
    }

    #[test]
    fn test_delay_saturates_for_large_retry_counts() {
        let policy = RetryPolicy::new(100, Duration::from_millis(500));
        assert_eq!(policy.delay_for(70), Duration::from_secs(30));
        assert_eq!(policy.delay_for(1000), Duration::from_secs(30));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_until_success() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("test", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(transient())
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::new(2, Duration::ZERO);

        let result: Result<()> = policy
            .run("test", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_terminal_error_not_retried() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Duration::ZERO);

        let result: Result<()> = policy
            .run("test", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::Unauthorized(Service::Garmin))
            })
            .await;

        assert!(result.unwrap_err().is_auth_error());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_if_limits_retries_to_predicate() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Duration::ZERO);

        let result: Result<()> = policy
            .run_if("test", AppError::is_rate_limited, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let calls = &AtomicU32::new(0);
        let result = policy
            .run_if("test", AppError::is_rate_limited, move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(AppError::RateLimited {
                        service: Service::Notion,
                        retry_after: None,
                    })
                } else {
                    Ok("created")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "created");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_pacer_spaces_writes() {
        let pacer = WritePacer::new(Duration::from_millis(30));
        let start = std::time::Instant::now();
        pacer.pace().await;
        pacer.pace().await;
        pacer.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_disabled_pacer_never_waits() {
        let pacer = WritePacer::disabled();
        let start = std::time::Instant::now();
        for _ in 0..10 {
            pacer.pace().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
