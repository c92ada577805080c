//! # Ticket Subcommand
//!
//! Verifies the proof of an issued interaction ticket. Accepts either the
//! bare credential or the full `{attributeSetType, ticket}` response body.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use itp_crypto::Ed25519PublicKey;
use itp_vc::SignedCredential;
use serde_json::Value;

#[derive(Args, Debug)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommand,
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// Verify a signed ticket against a provider public key.
    Verify {
        /// Provider Ed25519 public key, 64 hex chars.
        #[arg(long)]
        public_key: String,

        /// JSON file holding the ticket or the issuance response.
        file: PathBuf,
    },
}

pub fn run_ticket(args: &TicketArgs) -> Result<u8> {
    match &args.command {
        TicketCommand::Verify { public_key, file } => {
            let public_key = Ed25519PublicKey::from_hex(public_key).context("invalid public key")?;
            let ticket = load_ticket(file)?;
            match ticket.verify(&public_key) {
                Ok(()) => {
                    println!(
                        "OK: {} ticket for interaction {} signed by {}",
                        ticket.body.ticket_type().unwrap_or("unknown"),
                        ticket.body.credential_subject.interaction_id,
                        ticket.verification_method()
                    );
                    Ok(0)
                }
                Err(e) => {
                    println!("FAIL: {e}");
                    Ok(1)
                }
            }
        }
    }
}

/// Read a ticket from `path`, unwrapping a response body if present.
pub fn load_ticket(path: &Path) -> Result<SignedCredential> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    parse_ticket(value)
}

fn parse_ticket(mut value: Value) -> Result<SignedCredential> {
    let credential = match value.get_mut("ticket") {
        Some(ticket) => ticket.take(),
        None => value,
    };
    if credential.get("proof").is_none() {
        bail!("document has no proof block");
    }
    serde_json::from_value(credential).context("document is not a signed interaction ticket")
}
