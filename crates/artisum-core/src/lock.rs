//! Lock encoding for a single artifact's checksums.
//!
//! Format: `<algo1>-<digest1>,<algo2>-<digest2>,...`
//!
//! Entries are always written sorted by their lock form so the persisted
//! text does not depend on the order checksums were collected in. Each entry
//! is split on its first `-` only, and the digest must be non-empty hex.

use std::collections::BTreeMap;

use crate::algorithm::Algorithm;
use crate::checksum::Checksum;
use crate::error::{CoreError, Result};

/// Parse a comma-separated entry list, attributing every checksum to `source`.
///
/// Blank input yields no checksums.
pub fn parse_lock_entries(text: &str, source: &str) -> Result<Vec<Checksum>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|entry| parse_entry(entry.trim(), source))
        .collect()
}

fn parse_entry(entry: &str, source: &str) -> Result<Checksum> {
    let malformed = || CoreError::MalformedLockEntry(entry.to_string());

    let (algorithm, digest) = entry.split_once('-').ok_or_else(malformed)?;
    let algorithm = Algorithm::new(algorithm).map_err(|_| malformed())?;
    Checksum::try_new(algorithm, digest, source).map_err(|_| malformed())
}

/// Serialize checksums to their sorted, comma-joined lock form.
pub fn serialize_lock_entries<'a, I>(checksums: I) -> String
where
    I: IntoIterator<Item = &'a Checksum>,
{
    let mut entries: Vec<String> = checksums.into_iter().map(Checksum::to_lock).collect();
    entries.sort();
    entries.join(",")
}

/// Whether freshly computed digests agree with stored checksums.
///
/// Only algorithms present on both sides are compared. When there is no
/// algorithm in common (including when either side is empty) there is
/// nothing to contradict the stored record, and the result is `true`.
pub fn match_digests(
    stored: &BTreeMap<Algorithm, Checksum>,
    fresh: &BTreeMap<Algorithm, String>,
) -> bool {
    stored
        .iter()
        .filter_map(|(algorithm, checksum)| {
            fresh
                .get(algorithm)
                .map(|digest| checksum.digest() == digest)
        })
        .all(|matched| matched)
}
