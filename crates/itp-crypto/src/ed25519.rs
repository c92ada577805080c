//! # Ed25519 Signing and Verification
//!
//! ## Security Invariant
//!
//! - Signing input MUST implement the sealed [`SigningInput`] trait: either
//!   `CanonicalBytes` or a [`JcsHashData`] built from two `CanonicalBytes`.
//!   Raw byte slices cannot be signed, so a signature always covers a JCS
//!   form.
//! - `Ed25519KeyPair` does not implement `Serialize` and its `Debug` output
//!   never contains key bytes.
//! - Signing is all-or-nothing: `sign` returns either a complete 64-byte
//!   signature or an error, never a partial value.
//!
//! ## Serde
//!
//! Public keys and signatures serialize as lowercase hex strings. Signatures
//! also have a multibase (base58btc, `z` prefix) form for Data Integrity
//! proof values.

use ed25519_dalek::{Signer, Verifier};
use itp_core::CanonicalBytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// An Ed25519 public key (32 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

/// An Ed25519 key pair for signing operations.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

/// The `eddsa-jcs-2022` hash data:
/// `SHA-256(JCS(proofConfig)) || SHA-256(JCS(document))`.
#[derive(Clone, PartialEq, Eq)]
pub struct JcsHashData([u8; 64]);

mod sealed {
    pub trait Sealed {}
    impl Sealed for itp_core::CanonicalBytes {}
    impl Sealed for super::JcsHashData {}
}

/// Byte strings that may be signed. Sealed: only canonical forms qualify.
pub trait SigningInput: sealed::Sealed {
    fn signing_bytes(&self) -> &[u8];
}

impl SigningInput for CanonicalBytes {
    fn signing_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl SigningInput for JcsHashData {
    fn signing_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl JcsHashData {
    pub fn new(proof_config: &CanonicalBytes, document: &CanonicalBytes) -> Self {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&Sha256::digest(proof_config.as_bytes()));
        out[32..].copy_from_slice(&Sha256::digest(document.as_bytes()));
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl std::fmt::Debug for JcsHashData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JcsHashData({}...)", bytes_to_hex(&self.0[..4]))
    }
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_array::<32>(hex)
            .map_err(|e| CryptoError::KeyError(format!("public key: {e}")))?;
        Ok(Self(bytes))
    }

    /// Convert to an `ed25519_dalek::VerifyingKey`.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("invalid public key: {e}")))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", bytes_to_hex(&self.0[..4]))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render the signature as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_array::<64>(hex)
            .map_err(|e| CryptoError::VerificationFailed(format!("signature: {e}")))?;
        Ok(Self(bytes))
    }

    /// Multibase base58btc form: `z` followed by the base58 alphabet.
    pub fn to_multibase(&self) -> String {
        format!("{MULTIBASE_BASE58BTC}{}", bs58::encode(&self.0).into_string())
    }

    /// Parse a multibase base58btc signature. Other bases are rejected.
    pub fn from_multibase(value: &str) -> Result<Self, CryptoError> {
        let encoded = value.strip_prefix(MULTIBASE_BASE58BTC).ok_or_else(|| {
            CryptoError::VerificationFailed("signature is not multibase base58btc".into())
        })?;
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| CryptoError::VerificationFailed(format!("signature: {e}")))?;
        let bytes: [u8; 64] = bytes.try_into().map_err(|v: Vec<u8>| {
            CryptoError::VerificationFailed(format!("signature is {} bytes, expected 64", v.len()))
        })?;
        Ok(Self(bytes))
    }
}

const MULTIBASE_BASE58BTC: char = 'z';

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", bytes_to_hex(&self.0[..4]))
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a key pair from a 32-byte private key seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a canonical signing input.
    pub fn sign(&self, data: &impl SigningInput) -> Result<Ed25519Signature, CryptoError> {
        let sig = self
            .signing_key
            .try_sign(data.signing_bytes())
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(Ed25519Signature(sig.to_bytes()))
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify an Ed25519 signature over a canonical signing input.
pub fn verify_with_public_key(
    data: &impl SigningInput,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let vk = public_key.to_verifying_key()?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    vk.verify(data.signing_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(format!("Ed25519 verification failed: {e}")))
}

// ---------------------------------------------------------------------------
// Hex utilities
// ---------------------------------------------------------------------------

fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode exactly `N` bytes of hex, accepting an optional `0x` prefix.
pub(crate) fn hex_to_array<const N: usize>(hex: &str) -> Result<[u8; N], CryptoError> {
    let hex = hex.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() != N * 2 {
        return Err(CryptoError::HexDecode(format!(
            "expected {} hex chars, got {}",
            N * 2,
            hex.len()
        )));
    }
    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let at = i * 2;
        let pair = hex
            .get(at..at + 2)
            .ok_or_else(|| CryptoError::HexDecode(format!("non-ASCII input at position {at}")))?;
        *slot = u8::from_str_radix(pair, 16)
            .map_err(|e| CryptoError::HexDecode(format!("invalid hex at position {at}: {e}")))?;
    }
    Ok(out)
}
