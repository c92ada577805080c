//! # Credential Signer
//!
//! Holds the provider keypair, derived once from [`SigningKeyMaterial`] at
//! startup, and the verification method naming it. Signing returns either a
//! complete [`SignedCredential`] or an error; the unsigned document is
//! consumed either way.

use itp_core::{ProviderId, Timestamp};
use itp_crypto::{CryptoError, Ed25519KeyPair, Ed25519PublicKey, SigningKeyMaterial};

use crate::credential::{SignedCredential, UnsignedCredential, VcError};
use crate::proof::Proof;

/// Signs interaction tickets on behalf of one provider key.
pub struct CredentialSigner {
    keypair: Ed25519KeyPair,
    verification_method: String,
}

impl CredentialSigner {
    /// Derive the keypair from `material` and bind it to `provider`.
    ///
    /// Fails when the key URI cannot be parsed or derived; callers treat
    /// that as fatal at startup.
    pub fn new(material: &SigningKeyMaterial, provider: ProviderId) -> Result<Self, CryptoError> {
        let keypair = material.derive_keypair()?;
        Ok(Self::from_keypair(
            keypair,
            provider.verification_method(material.key_id()),
        ))
    }

    /// Wrap an existing keypair.
    pub fn from_keypair(keypair: Ed25519KeyPair, verification_method: impl Into<String>) -> Self {
        Self {
            keypair,
            verification_method: verification_method.into(),
        }
    }

    /// `dsnp://<provider>#<keyId>`.
    pub fn verification_method(&self) -> &str {
        &self.verification_method
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Sign `doc`, stamping the proof with the current time.
    pub fn sign(&self, doc: UnsignedCredential) -> Result<SignedCredential, VcError> {
        self.sign_at(doc, Timestamp::now())
    }

    /// Sign `doc` with an explicit proof creation time.
    pub fn sign_at(
        &self,
        doc: UnsignedCredential,
        created: Timestamp,
    ) -> Result<SignedCredential, VcError> {
        let mut proof = Proof::unsigned(&doc, self.verification_method.clone(), created);
        let hash_data = proof.hash_data(&doc)?;
        let signature = self
            .keypair
            .sign(&hash_data)
            .map_err(|e| VcError::SigningFailed(e.to_string()))?;
        proof.proof_value = signature.to_multibase();
        Ok(SignedCredential { body: doc, proof })
    }
}

impl std::fmt::Debug for CredentialSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSigner")
            .field("verification_method", &self.verification_method)
            .field("public_key", &self.keypair.public_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_credential;
    use crate::proof::{Cryptosuite, ProofPurpose, ProofType};
    use itp_crypto::Ed25519Signature;

    const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    fn signer() -> CredentialSigner {
        let material = SigningKeyMaterial::new(SEED_HEX, "key-1").unwrap();
        CredentialSigner::new(&material, ProviderId::new(13972)).unwrap()
    }

    fn doc() -> UnsignedCredential {
        build_credential(
            "https://ondc.org/schema/interactions/ProofOfPurchase.json",
            "https://shop.example/orders/7",
            "int-7",
            "OndcProofOfPurchase",
            ProviderId::new(13972),
            Timestamp::parse("2026-02-02T02:02:02Z").unwrap(),
        )
    }

    #[test]
    fn verification_method_is_issuer_hash_key_id() {
        let s = signer();
        assert_eq!(s.verification_method(), "dsnp://13972#key-1");
        let signed = s.sign(doc()).unwrap();
        assert_eq!(
            signed.verification_method(),
            format!("{}#key-1", signed.body.issuer)
        );
    }

    #[test]
    fn signed_ticket_verifies_and_keeps_body() {
        let s = signer();
        let body = doc();
        let signed = s.sign(body.clone()).unwrap();
        assert_eq!(signed.body, body);
        assert_eq!(signed.proof.proof_type, ProofType::DataIntegrityProof);
        assert_eq!(signed.proof.cryptosuite, Cryptosuite::EddsaJcs2022);
        assert_eq!(signed.proof.proof_purpose, ProofPurpose::AssertionMethod);
        assert_eq!(signed.proof.context.as_ref(), Some(&body.context));
        assert!(Ed25519Signature::from_multibase(&signed.proof.proof_value).is_ok());
        signed.verify(&s.public_key()).unwrap();
    }

    #[test]
    fn same_material_yields_same_public_key() {
        assert_eq!(signer().public_key(), signer().public_key());
        assert_eq!(
            signer().public_key().to_hex(),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn signing_is_deterministic_for_fixed_time() {
        let created = Timestamp::parse("2026-02-02T02:02:03Z").unwrap();
        let a = signer().sign_at(doc(), created).unwrap();
        let b = signer().sign_at(doc(), created).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_key_material_fails_construction() {
        let material = SigningKeyMaterial::new("definitely not a key", "key-1").unwrap();
        assert!(CredentialSigner::new(&material, ProviderId::new(1)).is_err());
    }

    #[test]
    fn debug_does_not_expose_private_key() {
        let debug = format!("{:?}", signer());
        assert!(debug.contains("dsnp://13972#key-1"));
        assert!(!debug.contains(SEED_HEX));
    }
}
