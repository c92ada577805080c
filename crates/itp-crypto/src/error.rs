//! # Cryptographic Error Types

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key material could not be parsed or derived.
    #[error("key error: {0}")]
    KeyError(String),

    /// The signing primitive reported a failure.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        assert!(format!("{}", CryptoError::KeyError("bad uri".into())).contains("bad uri"));
        assert!(format!("{}", CryptoError::SigningFailed("rng".into())).contains("rng"));
        assert!(format!("{}", CryptoError::HexDecode("odd".into())).contains("odd"));
        assert!(
            format!("{}", CryptoError::VerificationFailed("sig".into())).starts_with("signature")
        );
    }
}
