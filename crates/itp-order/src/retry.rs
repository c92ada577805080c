//! Retry decorator for order verification.
//!
//! Retries only transport rejections (no status obtained). A status-code
//! rejection is the authority's answer and is returned immediately.
//! Delays double from the base: 200ms, 400ms, 800ms, ...

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{OrderVerificationResult, OrderVerifier, Rejection};

const BASE_DELAY_MS: u64 = 200;

/// Wraps an [`OrderVerifier`] with bounded exponential-backoff retries.
#[derive(Debug, Clone)]
pub struct RetryingOrderVerifier<V> {
    inner: V,
    max_retries: u32,
    base_delay: Duration,
}

impl<V: OrderVerifier> RetryingOrderVerifier<V> {
    /// At most `max_retries` retries after the first attempt.
    pub fn new(inner: V, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: Duration::from_millis(BASE_DELAY_MS),
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

#[async_trait]
impl<V: OrderVerifier> OrderVerifier for RetryingOrderVerifier<V> {
    async fn verify(&self, order_details: &Value) -> OrderVerificationResult {
        let mut attempt = 0u32;
        loop {
            match self.inner.verify(order_details).await {
                OrderVerificationResult::Rejected(Rejection::Transport(reason))
                    if attempt < self.max_retries =>
                {
                    let delay = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        "order-status request failed, retrying in {delay:?}: {reason}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
