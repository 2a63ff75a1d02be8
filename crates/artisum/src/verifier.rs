//! The Verifier: a shared checksum store behind a lock.
//!
//! Downloads of different artifacts digest their bytes concurrently, outside
//! the lock; only registration into the shared store is serialized.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use artisum_core::{
    checksums_from_source, match_digests, Algorithm, Checksum, FileSource, SecurityViolation,
};
use artisum_store::{ChecksumSection, ChecksumStore, StoreError};

use crate::error::{ArtisumError, Result};

/// Configuration for the Verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Whether computed digests are checked and recorded at all.
    ///
    /// Turning this off is the operator's explicit opt-out; conflicts are
    /// then never detected.
    pub verify_checksums: bool,
    /// Algorithms computed for every verified artifact.
    pub algorithms: Vec<Algorithm>,
    /// Provenance recorded for computed digests instead of the source's own
    /// description.
    pub source_label: Option<String>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            verify_checksums: true,
            algorithms: vec![Algorithm::sha256()],
            source_label: None,
        }
    }
}

impl VerifierConfig {
    /// Reject configurations the digest computer cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(ArtisumError::InvalidConfig(
                "at least one digest algorithm is required".to_string(),
            ));
        }
        if let Some(algorithm) = self.algorithms.iter().find(|a| !a.is_supported()) {
            return Err(ArtisumError::InvalidConfig(format!(
                "no digest engine for algorithm {algorithm}"
            )));
        }
        Ok(())
    }
}

/// Outcome of verifying one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Every algorithm known on both sides agreed.
    Matched {
        /// The algorithms that were compared.
        algorithms: Vec<Algorithm>,
    },
    /// Nothing to compare against; the computed digests were recorded.
    Recorded,
    /// Verification is disabled by configuration.
    Skipped,
}

/// Verifies artifacts against every checksum seen for them so far.
pub struct Verifier {
    store: RwLock<ChecksumStore>,
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier with an empty store.
    pub fn new(config: VerifierConfig) -> Result<Self> {
        Self::with_store(ChecksumStore::new(), config)
    }

    /// Create a verifier seeded with an existing store.
    pub fn with_store(store: ChecksumStore, config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: RwLock::new(store),
            config,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ingest
    // ─────────────────────────────────────────────────────────────────────────

    /// Parse a lockfile checksum section and register it.
    pub fn load_lock(&self, text: &str, source: &str) -> Result<()> {
        let section = ChecksumSection::parse(text, source)?;
        let mut store = self.write();
        section.register_into(&mut store)?;
        tracing::debug!(source, artifacts = section.len(), "loaded checksum section");
        Ok(())
    }

    /// Register externally obtained checksums (e.g. from a registry index).
    pub fn register<I>(&self, artifact: &str, checksums: I) -> Result<()>
    where
        I: IntoIterator<Item = Checksum>,
    {
        self.write().register(artifact, checksums)?;
        Ok(())
    }

    /// Digest `source` and check it against what is known about `artifact`.
    ///
    /// The computed checksums are registered, so later sources are checked
    /// against them too. A disagreement on any shared algorithm fails with
    /// the artifact's security violation and leaves the store unchanged.
    pub fn verify<S>(&self, artifact: &str, source: &mut S) -> Result<Verification>
    where
        S: FileSource + ?Sized,
    {
        if !self.config.verify_checksums {
            tracing::warn!(artifact, "checksum verification disabled, skipping");
            return Ok(Verification::Skipped);
        }

        let mut computed = checksums_from_source(source, &self.config.algorithms)?;
        if let Some(label) = &self.config.source_label {
            computed = computed
                .into_iter()
                .map(|(algorithm, c)| {
                    let relabeled = Checksum::new(algorithm.clone(), c.digest(), label.as_str());
                    (algorithm, relabeled)
                })
                .collect();
        }
        let digests: BTreeMap<Algorithm, String> = computed
            .iter()
            .map(|(algorithm, c)| (algorithm.clone(), c.digest().to_string()))
            .collect();

        let mut store = self.write();
        let stored = store.get(artifact);
        let compared: Vec<Algorithm> = stored
            .keys()
            .filter(|a| digests.contains_key(*a))
            .cloned()
            .collect();

        if !match_digests(stored, &digests) {
            tracing::warn!(artifact, "computed digest disagrees with stored checksum");
            let conflict = compared.iter().find_map(|algorithm| {
                let existing = &stored[algorithm];
                let incoming = &computed[algorithm];
                (existing.digest() != incoming.digest())
                    .then(|| SecurityViolation::conflict(existing, incoming))
            });
            if let Some(violation) = conflict {
                return Err(StoreError::Security(violation.for_artifact(artifact)).into());
            }
        }
        store.register(artifact, computed.into_values())?;

        if compared.is_empty() {
            tracing::debug!(artifact, "no checksum to compare, recorded");
            Ok(Verification::Recorded)
        } else {
            tracing::debug!(artifact, algorithms = compared.len(), "checksums matched");
            Ok(Verification::Matched {
                algorithms: compared,
            })
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query & Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy of the checksums known for `artifact`.
    pub fn checksums(&self, artifact: &str) -> BTreeMap<Algorithm, Checksum> {
        self.read().get(artifact).clone()
    }

    /// Lock form of `artifact`'s checksums.
    pub fn to_lock(&self, artifact: &str) -> String {
        self.read().to_lock(artifact)
    }

    /// Render the checksum section for every artifact in the store.
    pub fn lock_section(&self) -> String {
        ChecksumSection::from(&*self.read()).to_lock()
    }

    /// Render the checksum section for exactly `artifacts`.
    pub fn lock_section_for<I, S>(&self, artifacts: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ChecksumSection::from_store(&self.read(), artifacts).to_lock()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Speculation
    // ─────────────────────────────────────────────────────────────────────────

    /// An independent copy of the current store.
    pub fn snapshot(&self) -> ChecksumStore {
        self.read().clone()
    }

    /// Merge a speculatively built store back in.
    pub fn commit(&self, speculative: &ChecksumStore) -> Result<()> {
        self.write().merge(speculative)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, ChecksumStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChecksumStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}
