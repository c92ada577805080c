//! # Interaction Orchestrator
//!
//! Drives one interaction claim through the issuance pipeline:
//!
//! ```text
//! Received -> Dispatched -> Evaluated -> Corroborated -> Built -> Signed
//! ```
//!
//! Each step either advances or ends the request in one of the terminal
//! failures of [`InteractionError`]. The orchestrator holds no mutable
//! state; every collaborator is shared read-only behind an `Arc`.
//!
//! Check order: rule lookup, entitlement, `orderDetails` parse, order
//! verification, build, sign. A request never reaches the order-status
//! authority unless the rule entitled it and its order data parsed.

use std::sync::Arc;

use itp_core::{AttributeSetType, ProviderId, Timestamp};
use itp_entitlement::{ClaimError, EntitlementRegistry, EntitlementVerdict, InteractionClaim};
use itp_order::{OrderVerificationResult, OrderVerifier, Rejection};
use itp_vc::{build_credential, CredentialSigner, SignedCredential, VcError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Successful outcome of `POST /v1/interactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "attributeSetType")]
    pub attribute_set_type: AttributeSetType,
    pub ticket: SignedCredential,
}

/// Terminal failure states.
#[derive(Error, Debug)]
pub enum InteractionError {
    /// No rule is registered for the claim's attribute-set-type.
    #[error("no entitlement rule registered for {0}")]
    NoSuchChecker(AttributeSetType),

    /// The rule ran and did not entitle the claim.
    #[error("claim is not entitled to {0}")]
    NotEntitled(AttributeSetType),

    /// The claim's order data is missing or unparseable.
    #[error("malformed claim: {0}")]
    MalformedClaim(#[from] ClaimError),

    /// The order-status authority did not verify the order.
    #[error("order rejected: {0}")]
    OrderRejected(Rejection),

    /// Canonicalization or signing of the ticket failed.
    #[error("signing failed: {0}")]
    SigningFailed(#[from] VcError),
}

impl InteractionError {
    /// Label for the `itp_interactions_total` counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NoSuchChecker(_) => "no_such_checker",
            Self::NotEntitled(_) => "not_entitled",
            Self::MalformedClaim(_) => "malformed_claim",
            Self::OrderRejected(_) => "order_rejected",
            Self::SigningFailed(_) => "signing_failed",
        }
    }
}

/// Routing and authorization failures keep their message. The three
/// internal causes collapse into one indistinguishable 500.
impl From<InteractionError> for AppError {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::NoSuchChecker(_) => AppError::NotFound(err.to_string()),
            InteractionError::NotEntitled(_) => AppError::Unauthorized(err.to_string()),
            InteractionError::MalformedClaim(_)
            | InteractionError::OrderRejected(_)
            | InteractionError::SigningFailed(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Stateless issuance pipeline over shared collaborators.
pub struct InteractionOrchestrator {
    registry: Arc<EntitlementRegistry>,
    verifier: Arc<dyn OrderVerifier>,
    signer: Arc<CredentialSigner>,
    provider: ProviderId,
}

impl InteractionOrchestrator {
    pub fn new(
        registry: Arc<EntitlementRegistry>,
        verifier: Arc<dyn OrderVerifier>,
        signer: Arc<CredentialSigner>,
        provider: ProviderId,
    ) -> Self {
        Self {
            registry,
            verifier,
            signer,
            provider,
        }
    }

    pub fn registry(&self) -> &EntitlementRegistry {
        &self.registry
    }

    pub fn signer(&self) -> &CredentialSigner {
        &self.signer
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    /// Run `claim` through the pipeline, recording the outcome.
    pub async fn submit(
        &self,
        claim: InteractionClaim,
    ) -> Result<InteractionResponse, InteractionError> {
        let attribute_set_type = claim.attribute_set_type.clone();
        let interaction_id = claim.interaction_id.clone();

        let result = self.run(claim).await;

        let outcome = match &result {
            Ok(_) => "signed",
            Err(e) => e.outcome(),
        };
        metrics::counter!("itp_interactions_total", "outcome" => outcome).increment(1);

        match &result {
            Ok(_) => tracing::info!(
                attribute_set_type = %attribute_set_type,
                interaction_id = %interaction_id,
                outcome,
                "interaction ticket issued"
            ),
            Err(e @ (InteractionError::NoSuchChecker(_) | InteractionError::NotEntitled(_))) => {
                tracing::info!(
                    attribute_set_type = %attribute_set_type,
                    interaction_id = %interaction_id,
                    outcome,
                    error = %e,
                    "interaction refused"
                )
            }
            Err(e) => tracing::warn!(
                attribute_set_type = %attribute_set_type,
                interaction_id = %interaction_id,
                outcome,
                error = %e,
                "interaction failed"
            ),
        }

        result
    }

    async fn run(&self, claim: InteractionClaim) -> Result<InteractionResponse, InteractionError> {
        // Received -> Dispatched
        let rule = self
            .registry
            .lookup(&claim.attribute_set_type)
            .map_err(|_| InteractionError::NoSuchChecker(claim.attribute_set_type.clone()))?;

        // Dispatched -> Evaluated
        let (schema_url, href) = match rule.evaluate(&claim) {
            EntitlementVerdict::Entitled { schema_url, href } => (schema_url, href),
            EntitlementVerdict::NotEntitled => {
                return Err(InteractionError::NotEntitled(claim.attribute_set_type));
            }
        };

        // Evaluated -> Corroborated
        let order_details = claim.parse_order_details()?;
        if let OrderVerificationResult::Rejected(rejection) =
            self.verifier.verify(&order_details).await
        {
            return Err(InteractionError::OrderRejected(rejection));
        }

        // Corroborated -> Built
        let unsigned = build_credential(
            &schema_url,
            &href,
            &claim.interaction_id,
            claim.attribute_set_type.ticket_type(),
            self.provider,
            Timestamp::now(),
        );

        // Built -> Signed
        let ticket = self.signer.sign(unsigned)?;

        Ok(InteractionResponse {
            attribute_set_type: claim.attribute_set_type,
            ticket,
        })
    }
}

impl std::fmt::Debug for InteractionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionOrchestrator")
            .field("registry", &self.registry)
            .field("signer", &self.signer)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
