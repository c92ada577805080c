//! # Key Subcommand
//!
//! Derives the provider keypair exactly as the service does at startup, so
//! operators can publish the public key without running the server, and
//! generates fresh mnemonic key URIs.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use itp_core::ProviderId;
use itp_crypto::{generate_mnemonic, SigningKeyMaterial};
use itp_vc::CredentialSigner;
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    /// Print the public key and verification method for a signing key URI.
    Inspect {
        /// Secret URI: hex seed or BIP39 mnemonic, `//junction`s, `///password`.
        #[arg(
            long,
            env = "PROVIDER_CREDENTIAL_SIGNING_KEY_URI",
            hide_env_values = true
        )]
        key_uri: String,

        /// Key identifier appended to the verification method.
        #[arg(long, env = "PROVIDER_CREDENTIAL_SIGNING_KEY_ID")]
        key_id: String,

        /// The provider's DSNP user id.
        #[arg(long, env = "PROVIDER_ID")]
        provider_id: String,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Generate a new 12-word mnemonic key URI and print its public identity.
    Generate {
        /// Key identifier appended to the verification method.
        #[arg(long, env = "PROVIDER_CREDENTIAL_SIGNING_KEY_ID")]
        key_id: String,

        /// The provider's DSNP user id.
        #[arg(long, env = "PROVIDER_ID")]
        provider_id: String,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Public identity derived from a key URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    pub public_key: String,
    pub verification_method: String,
}

/// A freshly generated key URI and the identity it derives.
pub struct GeneratedKey {
    pub key_uri: Zeroizing<String>,
    pub info: KeyInfo,
}

pub fn run_keys(args: &KeysArgs) -> Result<u8> {
    match &args.command {
        KeysCommand::Inspect {
            key_uri,
            key_id,
            provider_id,
            json,
        } => {
            let info = inspect(key_uri, key_id, provider_id)?;
            print_info(&info, None, *json)?;
            Ok(0)
        }
        KeysCommand::Generate {
            key_id,
            provider_id,
            json,
        } => {
            let generated = generate(key_id, provider_id)?;
            print_info(&generated.info, Some(generated.key_uri.as_str()), *json)?;
            Ok(0)
        }
    }
}

fn print_info(info: &KeyInfo, key_uri: Option<&str>, json: bool) -> Result<()> {
    if json {
        let mut out = serde_json::json!({
            "publicKey": info.public_key,
            "verificationMethod": info.verification_method,
        });
        if let Some(uri) = key_uri {
            out["keyUri"] = uri.into();
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if let Some(uri) = key_uri {
            println!("Key URI (secret): {uri}");
        }
        println!("Public key: {}", info.public_key);
        println!("Verification method: {}", info.verification_method);
    }
    Ok(())
}

/// Generate a mnemonic key URI and derive its identity under `provider_id`.
pub fn generate(key_id: &str, provider_id: &str) -> Result<GeneratedKey> {
    let key_uri = generate_mnemonic().context("mnemonic generation failed")?;
    let info = inspect(&key_uri, key_id, provider_id)?;
    Ok(GeneratedKey { key_uri, info })
}

/// Derive the keypair for `key_uri` and name it under `provider_id`.
pub fn inspect(key_uri: &str, key_id: &str, provider_id: &str) -> Result<KeyInfo> {
    let provider = ProviderId::parse(provider_id).context("invalid provider id")?;
    let material = SigningKeyMaterial::new(key_uri, key_id).context("invalid signing key")?;
    let signer = CredentialSigner::new(&material, provider).context("key derivation failed")?;
    tracing::debug!(verification_method = signer.verification_method(), "derived provider key");
    Ok(KeyInfo {
        public_key: signer.public_key().to_hex(),
        verification_method: signer.verification_method().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    #[test]
    fn inspect_hex_seed() {
        let info = inspect(SEED_HEX, "key-1", "13972").unwrap();
        assert_eq!(
            info.public_key,
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
        assert_eq!(info.verification_method, "dsnp://13972#key-1");
    }

    #[test]
    fn inspect_substrate_dev_uri() {
        let info = inspect("//Alice", "key-1", "1").unwrap();
        assert_eq!(
            info.public_key,
            "88dc3417d5058ec4b4503e0c12ea1a0a89be200fe98922423d4334014fa6b0ee"
        );
        assert_eq!(info.verification_method, "dsnp://1#key-1");
    }

    #[test]
    fn inspect_is_deterministic() {
        let phrase = concat!(
            "abandon abandon abandon abandon abandon abandon ",
            "abandon abandon abandon abandon abandon about"
        );
        let a = inspect(phrase, "k", "1").unwrap();
        let b = inspect(phrase, "k", "1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_key_reinspects_to_same_identity() {
        let generated = generate("key-2", "13972").unwrap();
        assert_eq!(generated.key_uri.split_whitespace().count(), 12);
        assert_eq!(generated.info.verification_method, "dsnp://13972#key-2");
        assert_eq!(
            inspect(&generated.key_uri, "key-2", "13972").unwrap(),
            generated.info
        );
        assert!(generate("key-2", "not-a-number").is_err());
    }

    #[test]
    fn inspect_rejects_bad_input() {
        assert!(inspect("not a key", "k", "1").is_err());
        assert!(inspect(SEED_HEX, "k", "abc").is_err());
        assert!(inspect(SEED_HEX, "", "1").is_err());
    }
}
