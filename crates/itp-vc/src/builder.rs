//! # Credential Builder
//!
//! Assembles the unsigned ticket from already-verified inputs. No I/O, no
//! failure modes: every input is a valid value by construction.

use itp_core::{ProviderId, Timestamp};
use serde_json::json;

use crate::credential::{CredentialSchema, InteractionSubject, UnsignedCredential};

/// The W3C credentials vocabulary root.
pub const CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Generic marker type carried by every ticket.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Type marker of the `credentialSchema` entry.
pub const SCHEMA_TYPE: &str = "VerifiableCredentialSchema2023";

/// Build the unsigned ticket.
///
/// `schema_url` and `href` come from the entitlement verdict, `ticket_type`
/// from the claim's attribute-set-type, and `issued_at` is the wall-clock
/// time of construction.
pub fn build_credential(
    schema_url: &str,
    href: &str,
    interaction_id: &str,
    ticket_type: &str,
    provider: ProviderId,
    issued_at: Timestamp,
) -> UnsignedCredential {
    UnsignedCredential {
        context: vec![
            json!(CREDENTIALS_V1_CONTEXT),
            json!({ "@vocab": provider.vocabulary() }),
        ],
        credential_type: vec![ticket_type.to_string(), VERIFIABLE_CREDENTIAL_TYPE.to_string()],
        issuer: provider.dsnp_uri(),
        issuance_date: issued_at,
        credential_schema: CredentialSchema {
            schema_type: SCHEMA_TYPE.to_string(),
            id: schema_url.to_string(),
        },
        credential_subject: InteractionSubject {
            interaction_id: interaction_id.to_string(),
            href: href.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> UnsignedCredential {
        build_credential(
            "https://ondc.org/schema/interactions/testnet/ProofOfPurchase.json",
            "https://shop.example/orders/42",
            "int-42",
            "OndcProofOfPurchase",
            ProviderId::new(13972),
            Timestamp::parse("2026-03-01T08:00:00Z").unwrap(),
        )
    }

    #[test]
    fn produces_expected_document() {
        let val = serde_json::to_value(build()).unwrap();
        assert_eq!(
            val,
            json!({
                "@context": [
                    "https://www.w3.org/2018/credentials/v1",
                    {"@vocab": "dsnp://13972#"}
                ],
                "type": ["OndcProofOfPurchase", "VerifiableCredential"],
                "issuer": "dsnp://13972",
                "issuanceDate": "2026-03-01T08:00:00Z",
                "credentialSchema": {
                    "type": "VerifiableCredentialSchema2023",
                    "id": "https://ondc.org/schema/interactions/testnet/ProofOfPurchase.json"
                },
                "credentialSubject": {
                    "interactionId": "int-42",
                    "href": "https://shop.example/orders/42"
                }
            })
        );
    }

    #[test]
    fn interaction_id_is_copied_verbatim() {
        let doc = build_credential(
            "s",
            "h",
            "  odd id/with#chars  ",
            "T",
            ProviderId::new(1),
            Timestamp::now(),
        );
        assert_eq!(doc.credential_subject.interaction_id, "  odd id/with#chars  ");
    }
}
