//! Error types for the Verifier.

use artisum_core::{CoreError, SecurityViolation};
use artisum_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Verifier operations.
#[derive(Debug, Error)]
pub enum ArtisumError {
    /// Checksum computation or parsing error.
    #[error("checksum error: {0}")]
    Core(#[from] CoreError),

    /// Store error, including enriched security violations.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Configuration rejected before use.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ArtisumError {
    /// Whether this error signals an integrity failure rather than misuse.
    pub fn is_security_violation(&self) -> bool {
        match self {
            ArtisumError::Core(e) => e.is_security_violation(),
            ArtisumError::Store(e) => e.is_security_violation(),
            ArtisumError::InvalidConfig(_) => false,
        }
    }

    /// The violation carried by this error, if any.
    pub fn security_violation(&self) -> Option<&SecurityViolation> {
        match self {
            ArtisumError::Core(CoreError::Security(v)) => Some(v),
            ArtisumError::Store(e) => e.security_violation(),
            _ => None,
        }
    }
}

/// Result type for Verifier operations.
pub type Result<T> = std::result::Result<T, ArtisumError>;
