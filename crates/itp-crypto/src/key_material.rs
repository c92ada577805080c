//! # Signing Key Material
//!
//! The provider's signing key is configured as a key URI plus a key id. The
//! URI is secret and derives the Ed25519 keypair deterministically; the key
//! id is public and appears in every credential's `verificationMethod`.
//!
//! Key URIs follow the Substrate secret-URI grammar, so a URI yields the
//! same public key here as in any Substrate keyring:
//!
//! ```text
//! <phrase-or-seed>[//hard]...[///password]
//! ```
//!
//! - `<phrase-or-seed>` is a BIP39 English mnemonic, or a 32-byte seed as
//!   64 hex characters (`0x` prefix optional). When empty, the well-known
//!   development phrase is used, so `//Alice` is Alice's dev key.
//! - A mnemonic's seed is the first 32 bytes of PBKDF2-HMAC-SHA512 over the
//!   BIP39 *entropy* (not the phrase), salted with `"mnemonic" + password`.
//!   A password has no effect on a hex seed.
//! - Each `//junction` is a hard derivation: `blake2b-256` of the SCALE
//!   encoding of `("Ed25519HDKD", seed, chain_code)`. A junction that parses
//!   as `u64` is encoded as a number, anything else as a string; encodings
//!   longer than 32 bytes are hashed to form the chain code.
//! - Soft junctions (`/x`) do not exist for Ed25519 and are rejected.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use codec::Encode;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::ed25519::{hex_to_array, Ed25519KeyPair};
use crate::error::CryptoError;

/// Algorithm of every key produced here.
pub const KEY_ALGORITHM: &str = "Ed25519";

/// Phrase used when a key URI starts directly with a junction.
pub const DEV_PHRASE: &str =
    "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

const HDKD_TAG: &str = "Ed25519HDKD";
const PASSWORD_DELIMITER: &str = "///";
const CHAIN_CODE_LEN: usize = 32;

type Blake2b256 = Blake2b<U32>;

/// A configured signing key reference.
///
/// The URI is held in zeroizing memory and never printed.
pub struct SigningKeyMaterial {
    key_uri: Zeroizing<String>,
    key_id: String,
}

impl SigningKeyMaterial {
    /// Pair a key URI with its public key id. Both must be non-empty.
    pub fn new(
        key_uri: impl Into<String>,
        key_id: impl Into<String>,
    ) -> Result<Self, CryptoError> {
        let key_uri = Zeroizing::new(key_uri.into());
        let key_id = key_id.into();
        if key_uri.trim().is_empty() {
            return Err(CryptoError::KeyError("signing key URI is empty".into()));
        }
        if key_id.trim().is_empty() {
            return Err(CryptoError::KeyError("signing key id is empty".into()));
        }
        Ok(Self { key_uri, key_id })
    }

    /// The public key id.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Always [`KEY_ALGORITHM`].
    pub fn algorithm(&self) -> &'static str {
        KEY_ALGORITHM
    }

    /// Derive the keypair named by the URI.
    pub fn derive_keypair(&self) -> Result<Ed25519KeyPair, CryptoError> {
        let uri = KeyUri::parse(self.key_uri.trim())?;
        let seed = uri.secret_seed()?;
        Ok(Ed25519KeyPair::from_seed(&seed))
    }
}

impl std::fmt::Debug for SigningKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyMaterial")
            .field("key_uri", &"<redacted>")
            .field("key_id", &self.key_id)
            .finish()
    }
}

/// A fresh 12-word BIP39 mnemonic, usable as a key URI.
pub fn generate_mnemonic() -> Result<Zeroizing<String>, CryptoError> {
    let mut entropy = Zeroizing::new([0u8; 16]);
    rand::rngs::OsRng.fill_bytes(&mut entropy[..]);
    let mnemonic = bip39::Mnemonic::from_entropy(&entropy[..])
        .map_err(|e| CryptoError::KeyError(format!("mnemonic generation failed: {e}")))?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

// ---------------------------------------------------------------------------
// URI parsing
// ---------------------------------------------------------------------------

struct KeyUri<'a> {
    phrase: &'a str,
    junctions: Vec<[u8; CHAIN_CODE_LEN]>,
    password: &'a str,
}

impl<'a> KeyUri<'a> {
    fn parse(uri: &'a str) -> Result<Self, CryptoError> {
        let (head, password) = match uri.find(PASSWORD_DELIMITER) {
            Some(idx) => (&uri[..idx], &uri[idx + PASSWORD_DELIMITER.len()..]),
            None => (uri, ""),
        };
        let (phrase, mut path) = match head.find('/') {
            Some(idx) => (head[..idx].trim(), &head[idx..]),
            None => (head.trim(), ""),
        };

        let mut junctions = Vec::new();
        while !path.is_empty() {
            let rest = path.strip_prefix("//").ok_or_else(|| {
                CryptoError::KeyError("soft derivation is not supported for Ed25519 keys".into())
            })?;
            let end = rest.find('/').unwrap_or(rest.len());
            let code = &rest[..end];
            if code.is_empty() {
                return Err(CryptoError::KeyError("key URI has an empty junction".into()));
            }
            junctions.push(chain_code(code));
            path = &rest[end..];
        }

        Ok(Self {
            phrase: if phrase.is_empty() { DEV_PHRASE } else { phrase },
            junctions,
            password,
        })
    }

    fn secret_seed(&self) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
        let mut seed = if is_hex_seed(self.phrase) {
            Zeroizing::new(hex_to_array::<32>(self.phrase)?)
        } else {
            self.mnemonic_seed()?
        };
        for chain_code in &self.junctions {
            seed = derive_hard(&seed, chain_code);
        }
        Ok(seed)
    }

    fn mnemonic_seed(&self) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
        let mnemonic = bip39::Mnemonic::parse_in(bip39::Language::English, self.phrase)
            .map_err(|e| CryptoError::KeyError(format!("invalid mnemonic: {e}")))?;
        let (entropy, len) = mnemonic.to_entropy_array();
        let entropy = Zeroizing::new(entropy);
        let big_seed = substrate_bip39::seed_from_entropy(&entropy[..len], self.password)
            .map(Zeroizing::new)
            .map_err(|e| CryptoError::KeyError(format!("invalid mnemonic entropy: {e:?}")))?;

        let mut seed = Zeroizing::new([0u8; 32]);
        seed.copy_from_slice(&big_seed[..32]);
        Ok(seed)
    }
}

fn is_hex_seed(s: &str) -> bool {
    let s = s.strip_prefix("0x").unwrap_or(s);
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Chain code of one junction: its SCALE encoding, zero-padded, or hashed
/// when longer than 32 bytes.
fn chain_code(code: &str) -> [u8; CHAIN_CODE_LEN] {
    let encoded = match code.parse::<u64>() {
        Ok(index) => index.encode(),
        Err(_) => code.encode(),
    };
    if encoded.len() > CHAIN_CODE_LEN {
        return Blake2b256::digest(&encoded).into();
    }
    let mut cc = [0u8; CHAIN_CODE_LEN];
    cc[..encoded.len()].copy_from_slice(&encoded);
    cc
}

fn derive_hard(seed: &[u8; 32], chain_code: &[u8; CHAIN_CODE_LEN]) -> Zeroizing<[u8; 32]> {
    let input = Zeroizing::new((HDKD_TAG, seed, chain_code).encode());
    Zeroizing::new(Blake2b256::digest(input.as_slice()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = concat!(
        "abandon abandon abandon abandon abandon abandon ",
        "abandon abandon abandon abandon abandon about"
    );

    fn derive(uri: &str) -> Result<Ed25519KeyPair, CryptoError> {
        SigningKeyMaterial::new(uri, "key-1")?.derive_keypair()
    }

    fn public_hex(uri: &str) -> String {
        derive(uri).unwrap().public_key().to_hex()
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn empty_uri_or_key_id_rejected() {
        assert!(SigningKeyMaterial::new("", "key-1").is_err());
        assert!(SigningKeyMaterial::new("   ", "key-1").is_err());
        assert!(SigningKeyMaterial::new(PHRASE, "").is_err());
    }

    #[test]
    fn accessors() {
        let km = SigningKeyMaterial::new(PHRASE, "key-7").unwrap();
        assert_eq!(km.key_id(), "key-7");
        assert_eq!(km.algorithm(), "Ed25519");
    }

    #[test]
    fn debug_redacts_uri() {
        let km = SigningKeyMaterial::new(PHRASE, "key-1").unwrap();
        let debug = format!("{km:?}");
        assert!(!debug.contains("abandon"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("key-1"));
    }

    #[test]
    fn hex_seed_matches_from_seed() {
        let seed = [9u8; 32];
        let expected = Ed25519KeyPair::from_seed(&seed).public_key();
        assert_eq!(derive(&hex(&seed)).unwrap().public_key(), expected);
        assert_eq!(derive(&format!("0x{}", hex(&seed))).unwrap().public_key(), expected);
    }

    #[test]
    fn hex_seed_ignores_password_and_accepts_junctions() {
        let seed = format!("0x{}", hex(&[9u8; 32]));
        assert_eq!(public_hex(&format!("{seed}///pw")), public_hex(&seed));
        assert_ne!(public_hex(&format!("{seed}//0")), public_hex(&seed));
    }

    #[test]
    fn substrate_dev_accounts() {
        assert_eq!(
            public_hex("//Alice"),
            "88dc3417d5058ec4b4503e0c12ea1a0a89be200fe98922423d4334014fa6b0ee"
        );
        assert_eq!(
            public_hex("//Bob"),
            "d17c2d7823ebf260fd138f2d7e27d114c0145d968b5ff5006125f2414fadae69"
        );
        assert_eq!(public_hex(&format!("{DEV_PHRASE}//Alice")), public_hex("//Alice"));
    }

    #[test]
    fn substrate_phrase_seeds() {
        assert_eq!(
            public_hex(DEV_PHRASE),
            "345071da55e5dccefaaa440339415ef9f2663338a38f7da0df21be5ab4e055ef"
        );
        assert_eq!(
            public_hex(&format!("{DEV_PHRASE}///pw")),
            "232e40fb55f2f77a66ae62c0522c37bbee84dbae0d7a172e47c1cfcad00535cc"
        );
        assert_eq!(
            public_hex(&format!("{DEV_PHRASE}//0")),
            "ffe0b81700cedadde9debaf7e61292d80581d4a37896055ba25f491b96b25ee6"
        );
        assert_eq!(
            public_hex(PHRASE),
            "9125f505bdef2cb5825b9931769316d3e2f22150786489a04f39b434ec9fb294"
        );
    }

    #[test]
    fn junctions_and_password_change_the_key() {
        let all = [
            public_hex(PHRASE),
            public_hex(&format!("{PHRASE}//0")),
            public_hex(&format!("{PHRASE}//1")),
            public_hex(&format!("{PHRASE}//0//1")),
            public_hex(&format!("{PHRASE}///secret")),
            public_hex(&format!("{PHRASE}//0///secret")),
            public_hex(&format!("{PHRASE}//provider")),
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn long_junction_is_hashed() {
        let name = "a-junction-name-well-beyond-thirty-two-bytes";
        let cc = chain_code(name);
        assert_eq!(cc, <[u8; 32]>::from(Blake2b256::digest(name.encode())));
        assert_ne!(chain_code("short"), cc);
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(derive("not a valid mnemonic phrase at all").is_err());
        assert!(derive(&format!("{PHRASE}/soft")).is_err());
        assert!(derive(&format!("{PHRASE}//a/soft")).is_err());
        assert!(derive(&format!("{PHRASE}//a//")).is_err());
        assert!(derive("aabb").is_err());
    }

    #[test]
    fn generated_mnemonic_derives() {
        let phrase = generate_mnemonic().unwrap();
        assert_eq!(phrase.split_whitespace().count(), 12);
        assert_ne!(*phrase, *generate_mnemonic().unwrap());
        assert_eq!(public_hex(&phrase), public_hex(&phrase));
    }
}
