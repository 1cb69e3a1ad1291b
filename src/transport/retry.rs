//! Bounded retries with linear backoff.
//!
//! | Outcome            | Action                         |
//! |--------------------|--------------------------------|
//! | 2xx                | return                         |
//! | 4xx                | fail now with `Client`         |
//! | 5xx / network      | wait `attempt × unit`, retry   |
//! | last attempt fails | `RetriesExhausted { last }`    |

use std::time::Duration;

use crate::error::{AppError, Result};

use super::{ApiRequest, ApiResponse, Transport};

/// Retry configuration for transport calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; values below one are raised to one.
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the attempt following `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }

    /// Send `request`, retrying transient failures.
    pub async fn execute<T>(&self, transport: &T, request: &ApiRequest) -> Result<ApiResponse>
    where
        T: Transport + ?Sized,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            log::debug!(
                "{} {} (attempt {}/{})",
                request.method,
                request.url,
                attempt,
                self.max_attempts
            );

            let error = match transport.send(request).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => response.into_error(),
                Err(error) => error,
            };

            if !error.is_retryable() {
                log::error!("{} {} failed: {}", request.method, request.url, error);
                return Err(error);
            }

            if attempt < self.max_attempts {
                let delay = self.delay_for(attempt);
                log::warn!(
                    "{} {} failed ({}), retrying in {:?}",
                    request.method,
                    request.url,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            last_error = Some(error);
        }

        let last = last_error.unwrap_or_else(|| AppError::network(&request.url, "no attempt made"));
        log::error!(
            "{} {} gave up after {} attempts: {}",
            request.method,
            request.url,
            self.max_attempts,
            last
        );
        Err(AppError::RetriesExhausted {
            attempts: self.max_attempts,
            last: Box::new(last),
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
