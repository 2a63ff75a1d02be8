//! # Artisum Core
//!
//! Pure primitives for artifact integrity: digests, checksums, and the
//! lock encoding.
//!
//! This crate contains no persistence and no networking. The only I/O it
//! performs is reading the byte stream handed to the digest computer.
//!
//! ## Key Types
//!
//! - [`Algorithm`] - Normalized digest algorithm identifier (`sha256`, ...)
//! - [`Checksum`] - Algorithm + hex digest + the sources it was observed at
//! - [`FileSource`] - Narrow interface the digest computer reads from
//! - [`SecurityViolation`] - Two sources disagree about an artifact's content
//!
//! ## Lock Encoding
//!
//! Checksums persist as `<algorithm>-<digest>` entries joined by `,`, always
//! sorted. See [`lock`] module.

pub mod algorithm;
pub mod checksum;
pub mod digest;
pub mod error;
pub mod lock;
pub mod source;

pub use algorithm::{digest_engine, Algorithm, DigestEngine};
pub use checksum::{checksums_from_source, Checksum};
pub use digest::{digests_from_source, CHUNK_SIZE};
pub use error::{CoreError, Result, SecurityViolation};
pub use lock::{match_digests, parse_lock_entries, serialize_lock_entries};
pub use source::{FileSource, PathSource, ReaderSource};
