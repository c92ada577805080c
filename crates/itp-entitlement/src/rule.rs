//! # Entitlement Rules
//!
//! A rule decides whether a claim's `reference` carries enough evidence to
//! proceed to order corroboration. Rules are pure with respect to the claim.
//!
//! The built-in [`OrderDetailsRule`] is the ONDC proof-of-purchase check:
//! entitled when `reference.orderDetails` is present and truthy. Whether the
//! order data is valid is decided later, by the order-status authority.

use crate::claim::{is_truthy, InteractionClaim};
use crate::verdict::EntitlementVerdict;

/// Production ONDC proof-of-purchase attribute-set-type.
pub const ONDC_PROOF_OF_PURCHASE: &str = "dsnp://1#OndcProofOfPurchase";
/// Test-network ONDC proof-of-purchase attribute-set-type.
pub const ONDC_PROOF_OF_PURCHASE_TESTNET: &str = "dsnp://13972#OndcProofOfPurchase";

pub const ONDC_PROOF_OF_PURCHASE_SCHEMA: &str =
    "https://ondc.org/schema/interactions/ProofOfPurchase.json";
pub const ONDC_PROOF_OF_PURCHASE_TESTNET_SCHEMA: &str =
    "https://ondc.org/schema/interactions/testnet/ProofOfPurchase.json";

/// An entitlement strategy bound to one attribute-set-type.
///
/// Implementations must be `Send + Sync`; the registry shares them across
/// request tasks.
pub trait EntitlementRule: Send + Sync + std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Evaluate `claim`. The same claim always yields the same verdict.
    fn evaluate(&self, claim: &InteractionClaim) -> EntitlementVerdict;
}

/// Entitles any claim with truthy `reference.orderDetails`, attaching a
/// fixed schema URL and echoing the claim's `href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetailsRule {
    name: String,
    schema_url: String,
}

impl OrderDetailsRule {
    pub fn new(name: impl Into<String>, schema_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_url: schema_url.into(),
        }
    }

    /// Production-network proof of purchase.
    pub fn ondc_proof_of_purchase() -> Self {
        Self::new("ondc-proof-of-purchase", ONDC_PROOF_OF_PURCHASE_SCHEMA)
    }

    /// Test-network proof of purchase.
    pub fn ondc_proof_of_purchase_testnet() -> Self {
        Self::new(
            "ondc-proof-of-purchase-testnet",
            ONDC_PROOF_OF_PURCHASE_TESTNET_SCHEMA,
        )
    }

    pub fn schema_url(&self) -> &str {
        &self.schema_url
    }
}

impl EntitlementRule for OrderDetailsRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, claim: &InteractionClaim) -> EntitlementVerdict {
        if claim.order_details().is_some_and(is_truthy) {
            EntitlementVerdict::entitled(self.schema_url.clone(), claim.href.clone())
        } else {
            EntitlementVerdict::NotEntitled
        }
    }
}
