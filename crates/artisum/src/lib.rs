//! # Artisum
//!
//! The unified API for checksum verification of package artifacts.
//!
//! ## Overview
//!
//! Artisum records every digest it sees for an artifact, from every source,
//! and refuses loudly when two sources disagree:
//!
//! - **Checksums**: An algorithm, a digest, and where it was observed
//! - **Store**: At most one digest per artifact and algorithm
//! - **Lock section**: Deterministic text form persisted in a lockfile
//! - **Verifier**: Digests downloads and checks them against the store
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use artisum::{ReaderSource, Verification, Verifier, VerifierConfig};
//!
//! let verifier = Verifier::new(VerifierConfig::default()).unwrap();
//!
//! // Checksums recorded by a previous resolution
//! verifier
//!     .load_lock(
//!         "  foo-1.0 sha256-b5bb9d8014a0f9b1d61e21e796d78dccdf1352f23cd32812f4850b878ae4944c\n",
//!         "Lockfile",
//!     )
//!     .unwrap();
//!
//! // A freshly downloaded copy
//! let mut download = ReaderSource::new("https://example.org/foo-1.0", Cursor::new(b"foo\n".to_vec()));
//! let outcome = verifier.verify("foo-1.0", &mut download).unwrap();
//! assert!(matches!(outcome, Verification::Matched { .. }));
//! ```
//!
//! ## Re-exports
//!
//! - `artisum::core` - Checksums, digest computation, lock encoding
//! - `artisum::store` - Checksum store and lockfile section

pub mod error;
pub mod verifier;

// Re-export component crates
pub use artisum_core as core;
pub use artisum_store as store;

pub use error::{ArtisumError, Result};
pub use verifier::{Verification, Verifier, VerifierConfig};

// Re-export commonly used types
pub use artisum_core::{
    checksums_from_source, match_digests, parse_lock_entries, serialize_lock_entries, Algorithm,
    Checksum, FileSource, PathSource, ReaderSource, SecurityViolation,
};
pub use artisum_store::{ChecksumSection, ChecksumStore};
