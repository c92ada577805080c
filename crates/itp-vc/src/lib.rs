//! # itp-vc: Interaction Ticket Credentials
//!
//! An interaction ticket is a W3C Verifiable Credential issued by the
//! provider once a claim has passed entitlement and order corroboration.
//!
//! - [`build_credential`] assembles the unsigned document. It is pure and
//!   cannot fail.
//! - [`CredentialSigner`] holds the provider's derived keypair and turns an
//!   [`UnsignedCredential`] into a [`SignedCredential`], all-or-nothing.
//! - [`SignedCredential::verify`] checks a ticket against a public key.
//!
//! ## Security Invariant
//!
//! Tickets carry a Data Integrity proof with the `eddsa-jcs-2022`
//! cryptosuite. The signing input is derived only from the JCS canonical
//! forms of the unsigned credential and the proof config, both produced
//! through `CanonicalBytes`. The proof value is never part of it.

pub mod builder;
pub mod credential;
pub mod proof;
pub mod signer;

pub use builder::{
    build_credential, CREDENTIALS_V1_CONTEXT, SCHEMA_TYPE, VERIFIABLE_CREDENTIAL_TYPE,
};
pub use credential::{
    CredentialSchema, InteractionSubject, SignedCredential, UnsignedCredential, VcError,
};
pub use proof::{Cryptosuite, Proof, ProofPurpose, ProofType};
pub use signer::CredentialSigner;
