//! # Entitlement Error Types

use itp_core::AttributeSetType;
use thiserror::Error;

/// Errors from building or querying the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A rule is already registered under this identifier.
    #[error("entitlement rule already registered for {0}")]
    Duplicate(AttributeSetType),

    /// The identifier has no ticket type after its `#`.
    #[error("attribute-set-type {0} has an empty ticket type")]
    EmptyTicketType(AttributeSetType),

    /// No rule is registered under this identifier.
    #[error("no entitlement rule registered for {0}")]
    NotFound(AttributeSetType),
}

/// Errors reading the order data embedded in a claim.
#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("reference.orderDetails is missing")]
    MissingOrderDetails,

    #[error("reference.orderDetails must be a JSON-encoded string")]
    OrderDetailsNotString,

    #[error("reference.orderDetails is not valid JSON: {0}")]
    InvalidOrderDetails(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_identifier() {
        let t = AttributeSetType::new("dsnp://1#OndcProofOfPurchase");
        let duplicate = RegistryError::Duplicate(t.clone()).to_string();
        assert!(duplicate.contains("dsnp://1#OndcProofOfPurchase"));
        let not_found = RegistryError::NotFound(t).to_string();
        assert!(not_found.starts_with("no entitlement rule"));
        assert!(ClaimError::MissingOrderDetails.to_string().contains("orderDetails"));
    }
}
