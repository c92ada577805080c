//! # API Route Modules
//!
//! - `interactions`: submit an interaction claim and receive a signed
//!   interaction ticket; list the attribute-set-types this provider issues.

pub mod interactions;
