//! Error types for the store module.

use artisum_core::{CoreError, SecurityViolation};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Two different digests were registered for the same artifact and
    /// algorithm. Carries artifact-specific remediation guidance.
    #[error(transparent)]
    Security(SecurityViolation),

    /// Misuse or malformed input surfaced by the core layer.
    #[error("checksum error: {0}")]
    Core(#[from] CoreError),

    /// A line of the checksum section could not be parsed.
    #[error("malformed checksum section line {line}: {content:?}")]
    MalformedSection {
        line: usize,
        content: String,
        #[source]
        source: CoreError,
    },
}

impl StoreError {
    /// Whether this error signals an integrity failure rather than misuse.
    pub fn is_security_violation(&self) -> bool {
        match self {
            StoreError::Security(_) => true,
            StoreError::Core(e) => e.is_security_violation(),
            StoreError::MalformedSection { .. } => false,
        }
    }

    /// The violation carried by this error, if any.
    pub fn security_violation(&self) -> Option<&SecurityViolation> {
        match self {
            StoreError::Security(v) | StoreError::Core(CoreError::Security(v)) => Some(v),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
