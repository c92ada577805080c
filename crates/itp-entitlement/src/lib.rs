//! # itp-entitlement: Who May Mint a Ticket
//!
//! An [`InteractionClaim`] names an attribute-set-type. The
//! [`EntitlementRegistry`] maps that identifier, by exact match, to one
//! [`EntitlementRule`], which inspects the claim's `reference` payload and
//! returns an [`EntitlementVerdict`].
//!
//! Rules are registered once at startup. After that the registry is only
//! read, so it is shared across requests behind an `Arc` without locking.
//! Adding a new ticket kind is one `register` call.

pub mod claim;
pub mod error;
pub mod registry;
pub mod rule;
pub mod verdict;

pub use claim::{InteractionClaim, ORDER_DETAILS_KEY};
pub use error::{ClaimError, RegistryError};
pub use registry::EntitlementRegistry;
pub use rule::{
    EntitlementRule, OrderDetailsRule, ONDC_PROOF_OF_PURCHASE, ONDC_PROOF_OF_PURCHASE_SCHEMA,
    ONDC_PROOF_OF_PURCHASE_TESTNET, ONDC_PROOF_OF_PURCHASE_TESTNET_SCHEMA,
};
pub use verdict::EntitlementVerdict;
