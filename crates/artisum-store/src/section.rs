//! The lockfile checksum section.
//!
//! One line per artifact, indented two spaces:
//!
//! ```text
//!   bar-2.0 sha256-bb
//!   foo-1.0 sha256-aa,sha512-cc
//!   baz-0.1
//! ```
//!
//! An artifact with no known checksum is written as its bare name. Lines are
//! sorted so the section is stable under re-resolution.

use std::collections::BTreeMap;

use artisum_core::{parse_lock_entries, serialize_lock_entries, Checksum};

use crate::error::{Result, StoreError};
use crate::store::ChecksumStore;

/// Indentation for each artifact line.
pub const INDENT: &str = "  ";

/// Parsed checksum section: artifact name to its checksums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumSection {
    entries: BTreeMap<String, Vec<Checksum>>,
}

impl ChecksumSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse section text, attributing every checksum to `source`.
    ///
    /// Blank lines are skipped. A repeated artifact line appends to the
    /// earlier one; disagreements surface when the section is registered.
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let mut section = Self::new();

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (artifact, entries) = match trimmed.split_once(char::is_whitespace) {
                Some((artifact, entries)) => (artifact, entries.trim()),
                None => (trimmed, ""),
            };
            let checksums =
                parse_lock_entries(entries, source).map_err(|e| StoreError::MalformedSection {
                    line: index + 1,
                    content: line.to_string(),
                    source: e,
                })?;

            section.add(artifact, checksums);
        }

        Ok(section)
    }

    /// Snapshot the given artifacts from `store`. Artifacts the store does
    /// not know are kept, without checksums.
    pub fn from_store<I, S>(store: &ChecksumStore, artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut section = Self::new();
        for artifact in artifacts {
            let artifact = artifact.as_ref();
            section.add(artifact, store.get(artifact).values().cloned().collect());
        }
        section
    }

    /// Record checksums for `artifact`, creating the line if needed.
    pub fn add(&mut self, artifact: &str, checksums: Vec<Checksum>) {
        self.entries
            .entry(artifact.to_string())
            .or_default()
            .extend(checksums);
    }

    pub fn get(&self, artifact: &str) -> Option<&[Checksum]> {
        self.entries.get(artifact).map(Vec::as_slice)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every line into `store`.
    pub fn register_into(&self, store: &mut ChecksumStore) -> Result<()> {
        for (artifact, checksums) in &self.entries {
            store.register(artifact, checksums.iter().cloned())?;
        }
        Ok(())
    }

    /// Render the section, one sorted line per artifact.
    pub fn to_lock(&self) -> String {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|(artifact, checksums)| {
                if checksums.is_empty() {
                    format!("{INDENT}{artifact}")
                } else {
                    format!("{INDENT}{artifact} {}", serialize_lock_entries(checksums))
                }
            })
            .collect();
        lines.sort();

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl From<&ChecksumStore> for ChecksumSection {
    fn from(store: &ChecksumStore) -> Self {
        Self::from_store(store, store.artifacts())
    }
}
