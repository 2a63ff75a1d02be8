//! Digest algorithm identifiers and the digest engine registry.
//!
//! Algorithms are identified by a normalized lowercase name (`sha256`). The
//! registry maps the uppercase form (`SHA256`) to a fresh hashing engine.

use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::fmt;

use crate::error::{CoreError, Result};

/// A normalized, lowercase digest algorithm identifier.
///
/// Never contains `-` or `,`, which delimit entries in the lock encoding.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Algorithm(String);

impl Algorithm {
    /// Normalize and validate an algorithm identifier.
    pub fn new(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        if normalized.is_empty()
            || !normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(CoreError::InvalidAlgorithm(name.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The default algorithm.
    pub fn sha256() -> Self {
        Self("sha256".to_string())
    }

    /// The lowercase identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The uppercase name used to look up a digest engine.
    pub fn engine_name(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Whether a digest engine is registered for this algorithm.
    pub fn is_supported(&self) -> bool {
        digest_engine(&self.engine_name()).is_ok()
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Algorithm({})", self.0)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Algorithm {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.0
    }
}

/// A stateful hashing object fed incrementally.
pub trait DigestEngine: Send {
    /// Feed a chunk of bytes.
    fn update(&mut self, chunk: &[u8]);

    /// Consume the engine and produce the lowercase hex digest.
    fn finalize_hex(self: Box<Self>) -> String;
}

struct Sha2Engine<D>(D);

impl<D> DigestEngine for Sha2Engine<D>
where
    D: Digest + Send,
{
    fn update(&mut self, chunk: &[u8]) {
        Digest::update(&mut self.0, chunk);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        hex::encode(self.0.finalize())
    }
}

struct Blake3Engine(blake3::Hasher);

impl DigestEngine for Blake3Engine {
    fn update(&mut self, chunk: &[u8]) {
        self.0.update(chunk);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        self.0.finalize().to_hex().to_string()
    }
}

/// Look up a fresh digest engine by its uppercase registry name.
///
/// Lookup is case-insensitive: `SHA256` and `sha256` are the same engine.
pub fn digest_engine(name: &str) -> Result<Box<dyn DigestEngine>> {
    match name.to_ascii_uppercase().as_str() {
        "SHA256" => Ok(Box::new(Sha2Engine(sha2::Sha256::new()))),
        "SHA384" => Ok(Box::new(Sha2Engine(sha2::Sha384::new()))),
        "SHA512" => Ok(Box::new(Sha2Engine(sha2::Sha512::new()))),
        "BLAKE3" => Ok(Box::new(Blake3Engine(blake3::Hasher::new()))),
        _ => Err(CoreError::UnsupportedAlgorithm(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_normalizes_case() {
        let algo = Algorithm::new("SHA256").unwrap();
        assert_eq!(algo, Algorithm::sha256());
        assert_eq!(algo.as_str(), "sha256");
        assert_eq!(algo.engine_name(), "SHA256");
    }

    #[test]
    fn test_algorithm_rejects_delimiters() {
        assert!(Algorithm::new("").is_err());
        assert!(Algorithm::new("sha-256").is_err());
        assert!(Algorithm::new("sha256,sha1").is_err());
    }

    #[test]
    fn test_unknown_algorithm_is_valid_but_unsupported() {
        let algo = Algorithm::new("md5").unwrap();
        assert!(!algo.is_supported());
        assert!(matches!(
            digest_engine("MD5"),
            Err(CoreError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_sha256_empty_input() {
        let engine = digest_engine("SHA256").unwrap();
        assert_eq!(
            engine.finalize_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_incremental_matches_single_update() {
        let mut split = digest_engine("SHA512").unwrap();
        split.update(b"hello ");
        split.update(b"world");

        let mut whole = digest_engine("sha512").unwrap();
        whole.update(b"hello world");

        assert_eq!(split.finalize_hex(), whole.finalize_hex());
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let json = serde_json::to_string(&Algorithm::sha256()).unwrap();
        assert_eq!(json, "\"sha256\"");
        let parsed: Algorithm = serde_json::from_str("\"BLAKE3\"").unwrap();
        assert_eq!(parsed.as_str(), "blake3");
        assert!(serde_json::from_str::<Algorithm>("\"sha-1\"").is_err());
    }
}
