//! # Interaction Claim
//!
//! The request body of "submit interaction". A claim is owned by exactly one
//! request and never mutated after it is received.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use itp_core::AttributeSetType;

use crate::error::ClaimError;

/// Key of the JSON-encoded order data inside `reference`.
pub const ORDER_DETAILS_KEY: &str = "orderDetails";

/// A client's request for an interaction ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionClaim {
    #[serde(rename = "attributeSetType")]
    pub attribute_set_type: AttributeSetType,

    /// Opaque client-supplied identifier, copied into the ticket verbatim.
    #[serde(rename = "interactionId")]
    pub interaction_id: String,

    /// URI of the canonical evidence for the interaction.
    pub href: String,

    /// Protocol-specific payload. An absent `reference` reads as empty.
    #[serde(default)]
    pub reference: Map<String, Value>,
}

impl InteractionClaim {
    /// The raw `reference.orderDetails` value, if present.
    pub fn order_details(&self) -> Option<&Value> {
        self.reference.get(ORDER_DETAILS_KEY)
    }

    /// Decode `reference.orderDetails`, which carries order data as a
    /// JSON-encoded string.
    ///
    /// A string that decodes to a falsy value (`null`, `false`, `0`, `""`)
    /// is treated as missing, so it never reaches the order-status
    /// authority.
    pub fn parse_order_details(&self) -> Result<Value, ClaimError> {
        let decoded = match self.order_details() {
            None => return Err(ClaimError::MissingOrderDetails),
            Some(Value::String(encoded)) => serde_json::from_str(encoded)?,
            Some(_) => return Err(ClaimError::OrderDetailsNotString),
        };
        if !is_truthy(&decoded) {
            return Err(ClaimError::MissingOrderDetails);
        }
        Ok(decoded)
    }
}

/// Presence test for untyped reference fields: null, false, zero and the
/// empty string count as absent.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claim(reference: Value) -> InteractionClaim {
        serde_json::from_value(json!({
            "attributeSetType": "dsnp://1#OndcProofOfPurchase",
            "interactionId": "int-1",
            "href": "https://shop.example/orders/1",
            "reference": reference,
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_wire_field_names() {
        let c = claim(json!({"orderDetails": "{}"}));
        assert_eq!(c.attribute_set_type.as_str(), "dsnp://1#OndcProofOfPurchase");
        assert_eq!(c.interaction_id, "int-1");
        assert_eq!(c.href, "https://shop.example/orders/1");
    }

    #[test]
    fn missing_reference_reads_as_empty() {
        let c: InteractionClaim = serde_json::from_value(json!({
            "attributeSetType": "dsnp://1#OndcProofOfPurchase",
            "interactionId": "int-1",
            "href": "h",
        }))
        .unwrap();
        assert!(c.reference.is_empty());
        assert!(c.order_details().is_none());
    }

    #[test]
    fn parses_encoded_order_details() {
        let c = claim(json!({"orderDetails": "{\"order\":1}"}));
        assert_eq!(c.parse_order_details().unwrap(), json!({"order": 1}));
    }

    #[test]
    fn parse_failures_are_distinguished() {
        assert!(matches!(
            claim(json!({})).parse_order_details(),
            Err(ClaimError::MissingOrderDetails)
        ));
        assert!(matches!(
            claim(json!({"orderDetails": "{not json"})).parse_order_details(),
            Err(ClaimError::InvalidOrderDetails(_))
        ));
        assert!(matches!(
            claim(json!({"orderDetails": {"order": 1}})).parse_order_details(),
            Err(ClaimError::OrderDetailsNotString)
        ));
    }

    #[test]
    fn falsy_decoded_order_details_read_as_missing() {
        for encoded in ["null", "false", "0", "0.0", "\"\""] {
            assert!(
                matches!(
                    claim(json!({"orderDetails": encoded})).parse_order_details(),
                    Err(ClaimError::MissingOrderDetails)
                ),
                "{encoded} should read as missing"
            );
        }
        for encoded in ["true", "1", "\"x\"", "[]", "{}"] {
            assert!(claim(json!({"orderDetails": encoded})).parse_order_details().is_ok());
        }
    }

    #[test]
    fn truthiness_matches_reference_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(-0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy}");
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy}");
        }
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let r: Result<InteractionClaim, _> = serde_json::from_value(json!({
            "attributeSetType": "dsnp://1#OndcProofOfPurchase",
            "href": "h",
        }));
        assert!(r.is_err());
    }
}
