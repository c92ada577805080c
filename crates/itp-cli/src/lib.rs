//! # itp-cli: Operator CLI for the Interaction Ticket Provider
//!
//! ## Subcommands
//!
//! - `itp keys inspect`: derive the provider keypair from a key URI and
//!   print the public key and verification method.
//! - `itp keys generate`: create a new mnemonic key URI and print it with
//!   the identity it derives.
//! - `itp ticket verify`: check the proof of an issued ticket.
//!
//! ```bash
//! itp keys generate --key-id key-1 --provider-id 13972
//! itp keys inspect --key-uri "//Alice" --key-id key-1 --provider-id 13972
//! itp ticket verify --public-key d75a98...511a response.json
//! ```

pub mod keys;
pub mod ticket;
