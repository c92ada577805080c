//! # Proof Block
//!
//! The cryptographic proof attached to an interaction ticket: a W3C Data
//! Integrity proof using the `eddsa-jcs-2022` cryptosuite.
//!
//! The signature covers `SHA-256(JCS(proofConfig)) || SHA-256(JCS(body))`,
//! where the proof config is the proof without `proofValue`. The proof
//! carries the body's `@context`, so the config binds the contexts too.
//! `proofValue` is the multibase (base58btc, `z` prefix) signature.
//!
//! The structure is rigid: unknown fields are rejected on deserialization.

use serde::{Deserialize, Serialize};

use itp_core::{CanonicalBytes, Timestamp};
use itp_crypto::JcsHashData;

use crate::credential::{UnsignedCredential, VcError};

/// The proof type used for tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    DataIntegrityProof,
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofType::DataIntegrityProof => write!(f, "DataIntegrityProof"),
        }
    }
}

/// The Data Integrity cryptosuite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cryptosuite {
    /// Ed25519 over JCS-canonicalized proof config and document.
    #[serde(rename = "eddsa-jcs-2022")]
    EddsaJcs2022,
}

impl std::fmt::Display for Cryptosuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cryptosuite::EddsaJcs2022 => write!(f, "eddsa-jcs-2022"),
        }
    }
}

/// The purpose of a proof, per the W3C data integrity vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofPurpose::AssertionMethod => write!(f, "assertionMethod"),
        }
    }
}

/// A proof on a signed ticket.
///
/// `verification_method` names the provider key as `dsnp://<id>#<keyId>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Proof {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<serde_json::Value>>,

    #[serde(rename = "type")]
    pub proof_type: ProofType,

    pub cryptosuite: Cryptosuite,

    pub created: Timestamp,

    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    #[serde(rename = "proofPurpose")]
    pub proof_purpose: ProofPurpose,

    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

/// The proof config: every proof field except `proofValue`.
#[derive(Serialize)]
struct ProofConfig<'a> {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    context: Option<&'a [serde_json::Value]>,
    #[serde(rename = "type")]
    proof_type: ProofType,
    cryptosuite: Cryptosuite,
    created: &'a Timestamp,
    #[serde(rename = "verificationMethod")]
    verification_method: &'a str,
    #[serde(rename = "proofPurpose")]
    proof_purpose: ProofPurpose,
}

impl Proof {
    /// An `eddsa-jcs-2022` assertion proof for `document`, not yet signed.
    pub fn unsigned(
        document: &UnsignedCredential,
        verification_method: impl Into<String>,
        created: Timestamp,
    ) -> Self {
        Self {
            context: Some(document.context.clone()),
            proof_type: ProofType::DataIntegrityProof,
            cryptosuite: Cryptosuite::EddsaJcs2022,
            created,
            verification_method: verification_method.into(),
            proof_purpose: ProofPurpose::AssertionMethod,
            proof_value: String::new(),
        }
    }

    /// The bytes the signature covers for `document`.
    ///
    /// Fails when the proof's `@context` is not a prefix of the document's.
    pub fn hash_data(&self, document: &UnsignedCredential) -> Result<JcsHashData, VcError> {
        if let Some(context) = &self.context {
            if !document.context.starts_with(context) {
                return Err(VcError::VerificationFailed(
                    "proof @context does not match credential @context".into(),
                ));
            }
        }
        let config = CanonicalBytes::new(&ProofConfig {
            context: self.context.as_deref(),
            proof_type: self.proof_type,
            cryptosuite: self.cryptosuite,
            created: &self.created,
            verification_method: &self.verification_method,
            proof_purpose: self.proof_purpose,
        })?;
        Ok(JcsHashData::new(&config, &document.signing_input()?))
    }
}
