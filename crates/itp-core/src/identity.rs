//! # Protocol Identifiers
//!
//! Newtype wrappers for the namespaced identifiers the ticket pipeline
//! routes on. These keep the string rules in one place: how a ticket type is
//! extracted from an attribute-set-type, and how a provider id becomes a
//! `dsnp://` URI.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// URI scheme of the social-networking protocol.
pub const DSNP_SCHEME: &str = "dsnp://";

/// Delimiter between the namespace and the ticket type.
const TYPE_DELIMITER: char = '#';

/// A namespaced identifier selecting an entitlement rule, formatted as
/// `<namespace>#<ticketType>` (e.g. `dsnp://1#OndcProofOfPurchase`).
///
/// Equality is exact on the full string; there is no prefix or wildcard
/// matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSetType(String);

impl AttributeSetType {
    /// Wrap a raw identifier. Any string is accepted; unknown identifiers
    /// simply fail registry lookup.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ticket type: everything after the first `#`.
    ///
    /// An identifier without a `#` yields the whole string. This never fails;
    /// `dsnp://1#` yields the empty string, which the registry refuses to
    /// register.
    pub fn ticket_type(&self) -> &str {
        match self.0.find(TYPE_DELIMITER) {
            Some(idx) => &self.0[idx + TYPE_DELIMITER.len_utf8()..],
            None => &self.0,
        }
    }

    /// Whether the identifier carries a namespace delimiter.
    pub fn is_namespaced(&self) -> bool {
        self.0.contains(TYPE_DELIMITER)
    }
}

impl std::fmt::Display for AttributeSetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeSetType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The protocol user id of the provider issuing tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(u64);

impl ProviderId {
    /// Create a provider id from its numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse a provider id from its decimal form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.trim();
        trimmed.parse::<u64>().map(Self).map_err(|e| {
            CoreError::Validation(format!(
                "provider id must be a decimal u64, got {trimmed:?}: {e}"
            ))
        })
    }

    /// The numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The provider's protocol URI, e.g. `dsnp://13972`. Used as the
    /// credential `issuer`.
    pub fn dsnp_uri(&self) -> String {
        format!("{DSNP_SCHEME}{}", self.0)
    }

    /// The provider-scoped vocabulary root, e.g. `dsnp://13972#`.
    pub fn vocabulary(&self) -> String {
        format!("{DSNP_SCHEME}{}{TYPE_DELIMITER}", self.0)
    }

    /// The verification method naming one of the provider's keys, e.g.
    /// `dsnp://13972#key-1`.
    pub fn verification_method(&self, key_id: &str) -> String {
        format!("{}{key_id}", self.vocabulary())
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ticket_type_is_total_and_a_suffix(s in ".{0,64}") {
            let t = AttributeSetType::new(s.clone());
            let ticket = t.ticket_type();
            prop_assert!(s.ends_with(ticket));
            prop_assert!(!t.is_namespaced() || ticket.len() < s.len());
        }
    }
}
