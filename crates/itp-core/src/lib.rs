//! # itp-core: Foundational Types for the Interaction Ticket Provider
//!
//! Every other crate in the workspace depends on `itp-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** Every byte sequence that gets signed flows
//!    through `CanonicalBytes::new()`. No raw `serde_json::to_vec()` on a
//!    signing path.
//!
//! 2. **Identifier newtypes.** `AttributeSetType` and `ProviderId` carry the
//!    protocol rules for namespaced identifiers (ticket-type extraction,
//!    `dsnp://` URI rendering) so callers never split strings by hand.
//!
//! 3. **UTC-only timestamps.** `Timestamp` renders as `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `itp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, CoreError};
pub use identity::{AttributeSetType, ProviderId, DSNP_SCHEME};
pub use temporal::Timestamp;
