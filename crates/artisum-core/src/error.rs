//! Error types for Artisum Core.

use std::fmt;

use thiserror::Error;

use crate::algorithm::Algorithm;
use crate::checksum::Checksum;

/// Core errors that can occur while computing, merging, or parsing checksums.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not a valid file source: {0}")]
    InvalidSource(String),

    #[error("cannot merge checksums of different algorithms: {expected} and {got}")]
    AlgorithmMismatch { expected: Algorithm, got: Algorithm },

    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid algorithm identifier: {0:?}")]
    InvalidAlgorithm(String),

    #[error("at least one digest algorithm is required")]
    NoAlgorithms,

    #[error("invalid digest: {0:?} is not a non-empty hexadecimal string")]
    InvalidDigest(String),

    #[error("malformed lock entry: {0:?}")]
    MalformedLockEntry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Security(#[from] SecurityViolation),
}

impl CoreError {
    /// Whether this error signals an integrity failure rather than misuse.
    pub fn is_security_violation(&self) -> bool {
        matches!(self, CoreError::Security(_))
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Two checksums for the same artifact and algorithm carry different digests.
///
/// Never recoverable at this layer. The message lists both digests and every
/// source the existing digest was observed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityViolation {
    artifact: Option<String>,
    message: String,
}

impl SecurityViolation {
    /// Build the violation raised when `incoming` disagrees with `existing`.
    pub fn conflict(existing: &Checksum, incoming: &Checksum) -> Self {
        let mut message = format!("{}\n{} from:\n", incoming, existing);
        for source in existing.sources() {
            message.push_str("* ");
            message.push_str(source);
            message.push('\n');
        }
        Self {
            artifact: None,
            message,
        }
    }

    /// Re-raise this violation with guidance for the artifact it occurred on.
    ///
    /// The original message is kept verbatim in the middle of the new one.
    pub fn for_artifact(&self, artifact: &str) -> Self {
        let message = format!(
            "Found multiple different checksums for {artifact}.\n\
             This means that there are multiple different files named `{artifact}`.\n\
             This is a potential security issue: the artifact being installed may not \
             be the one you expect.\n\
             \n\
             {original}\
             To resolve this issue:\n\
             1. delete any downloaded or cached artifacts referenced above\n\
             2. reinstall\n\
             \n\
             If you are sure that the new checksum is correct, you can remove the \
             `{artifact}` entry from the lockfile checksum section and reinstall.\n\
             \n\
             If you wish to continue installing the downloaded artifact, and are certain \
             it does not pose a security issue despite the mismatching checksum:\n\
             1. disable checksum verification\n\
             2. reinstall\n",
            original = self.message,
        );
        Self {
            artifact: Some(artifact.to_string()),
            message,
        }
    }

    /// The artifact this violation was attributed to, once enriched.
    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    /// The full diagnostic text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SecurityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SecurityViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_lists_both_digests() {
        let existing = Checksum::new(Algorithm::sha256(), "deadbeef", "cache");
        let incoming = Checksum::new(Algorithm::sha256(), "00000000", "remote");
        let violation = SecurityViolation::conflict(&existing, &incoming);

        assert_eq!(
            violation.message(),
            "sha256-00000000 (from remote)\nsha256-deadbeef (from cache) from:\n* cache\n"
        );
        assert!(violation.artifact().is_none());
    }

    #[test]
    fn test_for_artifact_preserves_original() {
        let existing = Checksum::new(Algorithm::sha256(), "aa", "cache");
        let incoming = Checksum::new(Algorithm::sha256(), "bb", "remote");
        let violation = SecurityViolation::conflict(&existing, &incoming);
        let enriched = violation.for_artifact("foo-1.0");

        assert_eq!(enriched.artifact(), Some("foo-1.0"));
        assert!(enriched.message().contains(violation.message()));
        assert!(enriched.message().starts_with("Found multiple different checksums for foo-1.0."));
        assert!(enriched.message().contains("disable checksum verification"));
    }

    #[test]
    fn test_is_security_violation() {
        let existing = Checksum::new(Algorithm::sha256(), "aa", "a");
        let incoming = Checksum::new(Algorithm::sha256(), "bb", "b");
        let err: CoreError = SecurityViolation::conflict(&existing, &incoming).into();
        assert!(err.is_security_violation());
        assert!(!CoreError::NoAlgorithms.is_security_violation());
    }
}
