// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry with a fixed delay for transient mirror node failures.
//!
//! Every outbound request runs through [`RetryPolicy::execute`]. Transient
//! failures (transport errors, 5xx, 429 throttling, garbled JSON bodies)
//! are retried up to `max_retries` times with a constant pause between
//! attempts; permanent failures surface immediately without consuming the
//! budget. Public mirror nodes throttle aggressively enough that a fixed
//! short delay recovers the common blips, while anything longer-lived is
//! better handled by resuming the crawl later from the persisted cursor.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use mirrorscan::RetryPolicy;
//!
//! let policy = RetryPolicy::new(3, Duration::from_millis(500));
//! let page = policy
//!     .execute("list-contracts", || client.fetch_page(url.clone()))
//!     .await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};
use crate::errors::MirrorNodeError;

/// How often and how patiently a failed request is repeated.
///
/// `max_retries` counts additional attempts after the first, so a policy
/// with `max_retries = 3` makes at most 4 attempts in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first failed attempt.
    pub max_retries: u32,
    /// Fixed pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with an explicit retry budget and delay.
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Create a policy that never retries. Useful in tests and for
    /// fail-fast deployments.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    /// Runs `attempt` until it succeeds, fails permanently, or the retry
    /// budget is spent.
    ///
    /// Only errors whose [`MirrorNodeError::is_transient`] is true are
    /// retried. When the budget runs out the final transient error is
    /// wrapped in [`MirrorNodeError::RetriesExhausted`] together with the
    /// attempt count.
    pub async fn execute<T, F, Fut>(
        &self,
        operation: &'static str,
        mut attempt: F,
    ) -> Result<T, MirrorNodeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, MirrorNodeError>>,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match attempt().await {
                Ok(value) => {
                    if attempts > 1 {
                        debug!(operation, attempts, "mirror node request recovered");
                    }
                    return Ok(value);
                }
                Err(error) if error.is_transient() && attempts <= self.max_retries => {
                    warn!(
                        operation,
                        attempt = attempts,
                        max_retries = self.max_retries,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %error,
                        "transient mirror node failure, retrying"
                    );
                    sleep(self.delay).await;
                }
                Err(error) if error.is_transient() => {
                    return Err(MirrorNodeError::retries_exhausted(
                        operation, attempts, error,
                    ));
                }
                Err(error) => return Err(error),
            }
        }
    }
}
