//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::collections::BTreeMap;
use std::io::Cursor;

use artisum_core::{digest_engine, Algorithm, Checksum, ReaderSource};
use artisum_store::{ChecksumSection, ChecksumStore};

/// A labelled in-memory byte source.
pub type MemorySource = ReaderSource<Cursor<Vec<u8>>>;

/// Create an in-memory source whose digests are attributed to `label`.
pub fn memory_source(label: &str, bytes: &[u8]) -> MemorySource {
    ReaderSource::new(label, Cursor::new(bytes.to_vec()))
}

/// Artifact identifier: `name-version`, plus `-platform` when given.
pub fn lock_name(name: &str, version: &str, platform: Option<&str>) -> String {
    match platform {
        Some(platform) => format!("{name}-{version}-{platform}"),
        None => format!("{name}-{version}"),
    }
}

/// Hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut engine = digest_engine("SHA256").expect("SHA256 is always registered");
    engine.update(bytes);
    engine.finalize_hex()
}

/// Builds the checksum section a lockfile would carry for a set of
/// artifacts, computing their SHA-256 digests from the given contents.
#[derive(Debug, Clone)]
pub struct ChecksumsBuilder {
    source: String,
    checksums: BTreeMap<String, Option<Checksum>>,
}

impl ChecksumsBuilder {
    /// Create a builder attributing checksums to `"ChecksumsBuilder"`.
    pub fn new() -> Self {
        Self::with_source("ChecksumsBuilder")
    }

    pub fn with_source(source: &str) -> Self {
        Self {
            source: source.to_string(),
            checksums: BTreeMap::new(),
        }
    }

    /// Add an artifact with the SHA-256 of `contents`.
    pub fn repo_artifact(
        &mut self,
        name: &str,
        version: &str,
        platform: Option<&str>,
        contents: &[u8],
    ) -> &mut Self {
        let checksum = Checksum::new(Algorithm::sha256(), sha256_hex(contents), self.source.as_str());
        self.checksums
            .insert(lock_name(name, version, platform), Some(checksum));
        self
    }

    /// Add an artifact listed without any checksum.
    pub fn empty_artifact(&mut self, name: &str, version: &str, platform: Option<&str>) -> &mut Self {
        self.checksums.insert(lock_name(name, version, platform), None);
        self
    }

    pub fn to_section(&self) -> ChecksumSection {
        let mut section = ChecksumSection::new();
        for (artifact, checksum) in &self.checksums {
            section.add(artifact, checksum.iter().cloned().collect());
        }
        section
    }

    /// Rendered section text.
    pub fn to_lock(&self) -> String {
        self.to_section().to_lock()
    }

    /// A store holding every artifact that has a checksum.
    pub fn to_store(&self) -> ChecksumStore {
        let mut store = ChecksumStore::new();
        self.to_section()
            .register_into(&mut store)
            .expect("one checksum per artifact cannot conflict");
        store
    }
}

impl Default for ChecksumsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_name() {
        assert_eq!(lock_name("foo", "1.0", None), "foo-1.0");
        assert_eq!(lock_name("foo", "1.0", Some("java")), "foo-1.0-java");
    }

    #[test]
    fn test_builder_renders_sorted_section() {
        let mut builder = ChecksumsBuilder::new();
        builder
            .repo_artifact("zeta", "1.0", None, b"")
            .empty_artifact("alpha", "0.1", None);

        assert_eq!(
            builder.to_lock(),
            "  alpha-0.1\n  zeta-1.0 sha256-e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n"
        );
        assert_eq!(builder.to_store().len(), 1);
    }
}
