//! # Order-Status Client
//!
//! The trust boundary for order corroboration. The body posted is the
//! claim's decoded `orderDetails`; the response body is not read. Only the
//! status code matters, and only 200 and 201 pass.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::OrderVerificationConfig;

/// Outcome of one corroboration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderVerificationResult {
    /// The authority answered 200 or 201.
    Verified { status: u16 },
    /// Anything else.
    Rejected(Rejection),
}

impl OrderVerificationResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Label for the `itp_order_verifications_total` counter.
    pub fn metric_label(&self) -> &'static str {
        match self {
            Self::Verified { .. } => "verified",
            Self::Rejected(Rejection::Status(_)) => "rejected_status",
            Self::Rejected(Rejection::Transport(_)) => "rejected_transport",
        }
    }
}

/// Why the authority did not verify an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The authority answered with a status other than 200/201.
    Status(u16),
    /// No status was obtained: timeout, refused connection, TLS failure.
    Transport(String),
}

impl Rejection {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "order-status authority answered HTTP {code}"),
            Self::Transport(reason) => write!(f, "order-status request failed: {reason}"),
        }
    }
}

/// Corroborates order data with an external authority.
///
/// Implementations never fail: any uncertainty is a
/// [`OrderVerificationResult::Rejected`].
#[async_trait]
pub trait OrderVerifier: Send + Sync {
    async fn verify(&self, order_details: &Value) -> OrderVerificationResult;
}

/// Errors constructing the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OrderClientError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// `reqwest`-backed verifier making one bounded POST per call.
#[derive(Debug, Clone)]
pub struct HttpOrderVerifier {
    client: reqwest::Client,
    status_url: Url,
}

impl HttpOrderVerifier {
    pub fn new(config: &OrderVerificationConfig) -> Result<Self, OrderClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| OrderClientError::ClientBuild(e.to_string()))?;
        Ok(Self {
            client,
            status_url: config.status_url.clone(),
        })
    }

    pub fn status_url(&self) -> &Url {
        &self.status_url
    }

    async fn post(&self, order_details: &Value) -> OrderVerificationResult {
        let response = match self
            .client
            .post(self.status_url.clone())
            .json(order_details)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let reason = if e.is_timeout() {
                    "timed out".to_string()
                } else {
                    e.to_string()
                };
                return OrderVerificationResult::Rejected(Rejection::Transport(reason));
            }
        };

        let status = response.status().as_u16();
        match status {
            200 | 201 => OrderVerificationResult::Verified { status },
            other => OrderVerificationResult::Rejected(Rejection::Status(other)),
        }
    }
}

#[async_trait]
impl OrderVerifier for HttpOrderVerifier {
    async fn verify(&self, order_details: &Value) -> OrderVerificationResult {
        let result = self.post(order_details).await;
        match &result {
            OrderVerificationResult::Verified { status } => {
                tracing::debug!(endpoint = %self.status_url, status, "order verified");
            }
            OrderVerificationResult::Rejected(rejection) => {
                tracing::warn!(endpoint = %self.status_url, %rejection, "order rejected");
            }
        }
        metrics::counter!("itp_order_verifications_total", "result" => result.metric_label())
            .increment(1);
        result
    }
}
