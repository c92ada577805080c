//! # itp-crypto: Cryptographic Primitives
//!
//! - **Ed25519** signing and verification. The signing input is always a
//!   canonical form (`CanonicalBytes` or the `eddsa-jcs-2022` hash data
//!   derived from it), so nothing un-canonicalized can be signed.
//! - **Key material** loading: the provider's signing keypair is derived
//!   deterministically from a Substrate-style secret URI, so the provider's
//!   public identity is stable across restarts and matches other Substrate
//!   keyrings.
//!
//! ## Crate Policy
//!
//! - Depends only on `itp-core` internally.
//! - Private keys are never serialized or printed; `Debug` impls redact them.
//! - No mocking of cryptographic operations in tests.

pub mod ed25519;
pub mod error;
pub mod key_material;

pub use ed25519::{
    verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, JcsHashData,
    SigningInput,
};
pub use error::CryptoError;
pub use key_material::{generate_mnemonic, SigningKeyMaterial, DEV_PHRASE, KEY_ALGORITHM};
