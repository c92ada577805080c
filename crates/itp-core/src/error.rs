//! # Error Types
//!
//! Errors shared by the foundational types. Every error uses `thiserror`
//! for `Display` and `Error`.

use thiserror::Error;

/// Top-level error type for `itp-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// An identifier or timestamp did not satisfy its format rules.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_rejected_display() {
        let err = CanonicalizationError::FloatRejected(1.5);
        assert!(format!("{err}").contains("1.5"));
    }

    #[test]
    fn canonicalization_converts_into_core_error() {
        let err: CoreError = CanonicalizationError::FloatRejected(0.25).into();
        assert!(matches!(err, CoreError::Canonicalization(_)));
        assert!(format!("{err}").starts_with("canonicalization error"));
    }

    #[test]
    fn validation_display() {
        let err = CoreError::Validation("bad provider id".to_string());
        assert_eq!(format!("{err}"), "validation error: bad provider id");
    }
}
