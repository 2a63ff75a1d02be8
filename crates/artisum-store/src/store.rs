//! The checksum store: one checksum per (artifact, algorithm).
//!
//! The store is a plain owned value with no internal locking. Callers that
//! share one across threads must serialize access themselves; to accumulate
//! checksums speculatively, clone the store, register into the clone, and
//! [`merge`](ChecksumStore::merge) it back.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use artisum_core::{serialize_lock_entries, Algorithm, Checksum, CoreError};

use crate::error::{Result, StoreError};

static EMPTY: BTreeMap<Algorithm, Checksum> = BTreeMap::new();

/// Checksums keyed by artifact identifier, then by algorithm.
///
/// Invariant: for any artifact there is at most one checksum per algorithm,
/// and once stored its digest never changes. Later registrations of the same
/// digest only add sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumStore {
    entries: BTreeMap<String, BTreeMap<Algorithm, Checksum>>,
}

impl ChecksumStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The checksums known for `artifact`, empty if there are none.
    ///
    /// Reading never creates an entry.
    pub fn get(&self, artifact: &str) -> &BTreeMap<Algorithm, Checksum> {
        self.entries.get(artifact).unwrap_or(&EMPTY)
    }

    pub fn contains(&self, artifact: &str) -> bool {
        self.entries.contains_key(artifact)
    }

    /// Remove every checksum for `artifact`.
    pub fn delete(&mut self, artifact: &str) -> Option<BTreeMap<Algorithm, Checksum>> {
        self.entries.remove(artifact)
    }

    /// Overwrite `artifact`'s record: delete, then register.
    pub fn replace<I>(&mut self, artifact: &str, checksums: I) -> Result<()>
    where
        I: IntoIterator<Item = Checksum>,
    {
        self.delete(artifact);
        self.register(artifact, checksums)
    }

    /// Add checksums for `artifact`, merging with any already stored under
    /// the same algorithm.
    ///
    /// A digest that disagrees with the stored one fails with
    /// [`StoreError::Security`], naming the artifact. The call is applied
    /// all-or-nothing: on failure the store is left exactly as it was.
    pub fn register<I>(&mut self, artifact: &str, checksums: I) -> Result<()>
    where
        I: IntoIterator<Item = Checksum>,
    {
        let mut staged = self.get(artifact).clone();

        for checksum in checksums {
            match staged.entry(checksum.algorithm().clone()) {
                Entry::Occupied(mut slot) => {
                    slot.get_mut()
                        .merge(&checksum)
                        .map_err(|e| enrich(artifact, e))?;
                    tracing::debug!(
                        artifact,
                        algorithm = %checksum.algorithm(),
                        sources = ?checksum.sources(),
                        "merged checksum"
                    );
                }
                Entry::Vacant(slot) => {
                    tracing::debug!(
                        artifact,
                        algorithm = %checksum.algorithm(),
                        digest = checksum.digest(),
                        "registered checksum"
                    );
                    slot.insert(checksum);
                }
            }
        }

        if !staged.is_empty() {
            self.entries.insert(artifact.to_string(), staged);
        }
        Ok(())
    }

    /// Register every artifact of `other` into this store.
    ///
    /// Stops at the first artifact whose checksums conflict; artifacts
    /// before it (in identifier order) have already been merged.
    pub fn merge(&mut self, other: &ChecksumStore) -> Result<()> {
        for (artifact, checksums) in &other.entries {
            self.register(artifact, checksums.values().cloned())?;
        }
        Ok(())
    }

    /// Lock form of `artifact`'s checksums (empty if unknown).
    pub fn to_lock(&self, artifact: &str) -> String {
        serialize_lock_entries(self.get(artifact).values())
    }

    /// Artifact identifiers in sorted order.
    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn enrich(artifact: &str, err: CoreError) -> StoreError {
    match err {
        CoreError::Security(violation) => {
            tracing::warn!(artifact, "conflicting checksums detected");
            StoreError::Security(violation.for_artifact(artifact))
        }
        other => other.into(),
    }
}
