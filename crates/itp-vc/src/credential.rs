//! # Interaction Ticket Credential Structure
//!
//! ## Security Invariants
//!
//! - **Signing** canonicalizes the [`UnsignedCredential`] and the proof
//!   config via [`CanonicalBytes::new()`] and signs the `eddsa-jcs-2022`
//!   hash data of the two. No raw `serde_json::to_vec()` is used in the
//!   signing path.
//! - **Verification** separates the proof, recomputes the hash data from
//!   the remaining body and the proof config, and checks the Ed25519
//!   signature. Field order in the received JSON is irrelevant.
//! - An `UnsignedCredential` is never mutated once signing begins; the
//!   signer takes it by value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use itp_core::{CanonicalBytes, Timestamp};
use itp_crypto::{verify_with_public_key, Ed25519PublicKey, Ed25519Signature};

use crate::proof::Proof;

/// Errors from ticket signing and verification.
#[derive(Error, Debug)]
pub enum VcError {
    /// Canonicalization of the credential body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] itp_core::CanonicalizationError),

    /// The signing primitive failed; no proof was attached.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Ed25519 signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// The proof value is not a multibase base58btc 64-byte signature.
    #[error("invalid proof value: {0}")]
    InvalidProofValue(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The `credentialSchema` entry: a type marker plus the schema URL chosen by
/// the entitlement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub id: String,
}

/// The `credentialSubject` of an interaction ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSubject {
    #[serde(rename = "interactionId")]
    pub interaction_id: String,
    pub href: String,
}

/// A ticket document before signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedCredential {
    /// JSON-LD contexts: the W3C credentials root, then the provider-scoped
    /// `{"@vocab": "dsnp://<id>#"}` extension.
    #[serde(rename = "@context")]
    pub context: Vec<serde_json::Value>,

    /// `[<ticketType>, "VerifiableCredential"]`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// The provider's protocol identifier, `dsnp://<id>`.
    pub issuer: String,

    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,

    #[serde(rename = "credentialSchema")]
    pub credential_schema: CredentialSchema,

    #[serde(rename = "credentialSubject")]
    pub credential_subject: InteractionSubject,
}

impl UnsignedCredential {
    /// The canonical bytes of the document, the second half of a proof's
    /// hash data.
    pub fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        Ok(CanonicalBytes::new(self)?)
    }

    /// The domain-specific ticket type (first `type` entry).
    pub fn ticket_type(&self) -> Option<&str> {
        self.credential_type.first().map(String::as_str)
    }
}

/// A signed interaction ticket: the unsigned body plus its proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedCredential {
    #[serde(flatten)]
    pub body: UnsignedCredential,

    pub proof: Proof,
}

impl SignedCredential {
    /// Check the proof against `public_key`.
    ///
    /// The signing input is recomputed from `body`, so any change to a body
    /// field after signing fails verification.
    pub fn verify(&self, public_key: &Ed25519PublicKey) -> Result<(), VcError> {
        let hash_data = self.proof.hash_data(&self.body)?;
        let signature = Ed25519Signature::from_multibase(&self.proof.proof_value)
            .map_err(|e| VcError::InvalidProofValue(e.to_string()))?;
        verify_with_public_key(&hash_data, &signature, public_key)
            .map_err(|e| VcError::VerificationFailed(e.to_string()))
    }

    /// The proof's verification method.
    pub fn verification_method(&self) -> &str {
        &self.proof.verification_method
    }
}
