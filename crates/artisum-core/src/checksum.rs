//! The checksum value object.
//!
//! A [`Checksum`] is one digest of one artifact under one algorithm, plus
//! every source that digest was observed at. The digest never changes after
//! construction; merging only grows the source list.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::algorithm::Algorithm;
use crate::digest::digests_from_source;
use crate::error::{CoreError, Result, SecurityViolation};
use crate::source::FileSource;

/// An algorithm, a hex digest, and the sources that reported it.
///
/// Sources keep the order in which they were first recorded, without
/// duplicates. Equality treats them as a set.
#[derive(Clone)]
pub struct Checksum {
    algorithm: Algorithm,
    digest: String,
    sources: Vec<String>,
}

impl Checksum {
    /// Create a checksum observed at a single source.
    ///
    /// The digest is taken as given. Use [`Checksum::try_new`] for digests
    /// from untrusted input.
    pub fn new(algorithm: Algorithm, digest: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            algorithm,
            digest: digest.into(),
            sources: vec![source.into()],
        }
    }

    /// Create a checksum, rejecting digests that are empty or not hex.
    pub fn try_new(
        algorithm: Algorithm,
        digest: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self> {
        let digest = digest.into();
        if !is_hex_digest(&digest) {
            return Err(CoreError::InvalidDigest(digest));
        }
        Ok(Self::new(algorithm, digest, source))
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Sources in the order they were recorded.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s == source)
    }

    /// Fold `other`'s sources into this checksum.
    ///
    /// Fails with [`CoreError::AlgorithmMismatch`] if the algorithms differ,
    /// and with a [`SecurityViolation`] if the digests differ. Neither failure
    /// modifies `self`.
    pub fn merge(&mut self, other: &Checksum) -> Result<&mut Self> {
        if self.algorithm != other.algorithm {
            return Err(CoreError::AlgorithmMismatch {
                expected: self.algorithm.clone(),
                got: other.algorithm.clone(),
            });
        }
        if self.digest != other.digest {
            return Err(SecurityViolation::conflict(self, other).into());
        }
        for source in &other.sources {
            if !self.has_source(source) {
                self.sources.push(source.clone());
            }
        }
        Ok(self)
    }

    /// Canonical lock form: `<algorithm>-<digest>`.
    pub fn to_lock(&self) -> String {
        format!("{}-{}", self.algorithm, self.digest)
    }

    fn source_set(&self) -> BTreeSet<&str> {
        self.sources.iter().map(String::as_str).collect()
    }
}

impl PartialEq for Checksum {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm
            && self.digest == other.digest
            && self.source_set() == other.source_set()
    }
}

impl Eq for Checksum {}

impl Hash for Checksum {
    // Digest alone: equal checksums always share it.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.hash(state);
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checksum")
            .field("algorithm", &self.algorithm.as_str())
            .field("digest", &self.digest)
            .field("sources", &self.sources)
            .finish()
    }
}

/// Human form: `sha256-abcd (from cache)`, with `, ...` once more than one
/// source has been recorded.
impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} (from ", self.algorithm, self.digest)?;
        if let Some(first) = self.sources.first() {
            f.write_str(first)?;
        }
        if self.sources.len() > 1 {
            f.write_str(", ...")?;
        }
        f.write_str(")")
    }
}

fn is_hex_digest(digest: &str) -> bool {
    !digest.is_empty() && digest.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Digest `source` once per algorithm and wrap each result as a checksum
/// attributed to `source.describe()`.
pub fn checksums_from_source<S>(
    source: &mut S,
    algorithms: &[Algorithm],
) -> Result<BTreeMap<Algorithm, Checksum>>
where
    S: FileSource + ?Sized,
{
    let label = source.describe();
    let engines = digests_from_source(source, algorithms)?;
    engines
        .into_iter()
        .map(|(algorithm, engine)| {
            let checksum = Checksum::try_new(algorithm.clone(), engine.finalize_hex(), label.clone())?;
            Ok((algorithm, checksum))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::io::Cursor;

    use crate::source::ReaderSource;

    fn sha256(digest: &str, source: &str) -> Checksum {
        Checksum::new(Algorithm::sha256(), digest, source)
    }

    #[test]
    fn test_merge_unions_sources() {
        let mut a = sha256("deadbeef", "cache");
        a.merge(&sha256("deadbeef", "remote")).unwrap();

        assert_eq!(a.digest(), "deadbeef");
        assert_eq!(a.sources(), ["cache", "remote"]);
    }

    #[test]
    fn test_merge_skips_known_source() {
        let mut a = sha256("aa", "cache");
        a.merge(&sha256("aa", "cache")).unwrap();
        assert_eq!(a.sources().len(), 1);
    }

    #[test]
    fn test_merge_different_algorithm_fails() {
        let mut a = sha256("aa", "cache");
        let b = Checksum::new(Algorithm::new("sha512").unwrap(), "aa", "remote");
        let err = a.merge(&b).unwrap_err();

        assert!(matches!(err, CoreError::AlgorithmMismatch { .. }));
        assert!(!err.is_security_violation());
        assert_eq!(a.sources(), ["cache"]);
    }

    #[test]
    fn test_merge_different_digest_is_violation() {
        let mut a = sha256("deadbeef", "cache");
        let err = a.merge(&sha256("00000000", "remote")).unwrap_err();

        assert!(err.is_security_violation());
        let text = err.to_string();
        assert!(text.contains("cache"));
        assert!(text.contains("remote"));
        assert_eq!(a.digest(), "deadbeef");
        assert_eq!(a.sources(), ["cache"]);
    }

    #[test]
    fn test_try_new_accepts_hex() {
        let checksum = Checksum::try_new(Algorithm::sha256(), "DEADbeef01", "cache").unwrap();
        assert_eq!(checksum.to_lock(), "sha256-DEADbeef01");
    }

    #[test]
    fn test_try_new_rejects_non_hex() {
        for digest in ["", "aa,bb", "ab-cd", "not hex at all", "deadbeeg"] {
            assert!(
                matches!(
                    Checksum::try_new(Algorithm::sha256(), digest, "cache"),
                    Err(CoreError::InvalidDigest(ref d)) if d == digest
                ),
                "{digest:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        let mut a = sha256("deadbeef", "cache");
        assert_eq!(a.to_string(), "sha256-deadbeef (from cache)");

        a.merge(&sha256("deadbeef", "remote")).unwrap();
        assert_eq!(a.to_string(), "sha256-deadbeef (from cache, ...)");
        assert_eq!(a.to_lock(), "sha256-deadbeef");
    }

    #[test]
    fn test_equality_ignores_source_order() {
        let mut ab = sha256("aa", "a");
        ab.merge(&sha256("aa", "b")).unwrap();
        let mut ba = sha256("aa", "b");
        ba.merge(&sha256("aa", "a")).unwrap();

        assert_eq!(ab, ba);
        assert_ne!(ab, sha256("aa", "a"));

        let set: HashSet<Checksum> = [ab, ba].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_checksums_from_source() {
        let mut source = ReaderSource::new("vendor/foo-1.0.gem", Cursor::new(Vec::new()));
        let checksums = checksums_from_source(&mut source, &[Algorithm::sha256()]).unwrap();

        let checksum = &checksums[&Algorithm::sha256()];
        assert_eq!(
            checksum.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(checksum.sources(), ["vendor/foo-1.0.gem"]);
    }

    proptest! {
        #[test]
        fn try_new_output_reparses(digest in "[0-9a-fA-F]{1,64}") {
            let checksum = Checksum::try_new(Algorithm::sha256(), digest.as_str(), "cache").unwrap();
            let parsed = crate::lock::parse_lock_entries(&checksum.to_lock(), "lock").unwrap();
            prop_assert_eq!(parsed.len(), 1);
            prop_assert_eq!(parsed[0].digest(), digest.as_str());
        }

        #[test]
        fn merge_order_does_not_change_outcome(
            digest in "[0-9a-f]{8,64}",
            left in "[a-z]{1,8}",
            right in "[a-z]{1,8}",
        ) {
            let mut forward = sha256(&digest, &left);
            forward.merge(&sha256(&digest, &right)).unwrap();
            let mut backward = sha256(&digest, &right);
            backward.merge(&sha256(&digest, &left)).unwrap();

            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(forward.digest(), digest.as_str());
        }

        #[test]
        fn mismatched_digest_never_mutates(
            stored in "[0-9a-f]{8}",
            fresh in "[0-9a-f]{8}",
        ) {
            prop_assume!(stored != fresh);
            let mut existing = sha256(&stored, "cache");
            let before = existing.clone();
            prop_assert!(existing.merge(&sha256(&fresh, "remote")).is_err());
            prop_assert_eq!(existing, before);
        }
    }
}
