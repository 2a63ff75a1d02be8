//! # Artisum Store
//!
//! Checksum bookkeeping for Artisum: one checksum per artifact and algorithm,
//! with conflict detection across every source that reports one.
//!
//! ## Key Types
//!
//! - [`ChecksumStore`] - Artifact identifier to per-algorithm checksums
//! - [`ChecksumSection`] - The lockfile section a store persists through
//! - [`StoreError`] - Including the artifact-enriched security violation
//!
//! ## Usage
//!
//! ```rust
//! use artisum_core::{Algorithm, Checksum};
//! use artisum_store::ChecksumStore;
//!
//! let mut store = ChecksumStore::new();
//! store
//!     .register("foo-1.0", [Checksum::new(Algorithm::sha256(), "deadbeef", "cache")])
//!     .unwrap();
//!
//! // Same digest from another source: sources accumulate.
//! store
//!     .register("foo-1.0", [Checksum::new(Algorithm::sha256(), "deadbeef", "remote")])
//!     .unwrap();
//!
//! // Different digest: refused, stored digest untouched.
//! let err = store
//!     .register("foo-1.0", [Checksum::new(Algorithm::sha256(), "00000000", "mirror")])
//!     .unwrap_err();
//! assert!(err.is_security_violation());
//! assert_eq!(store.to_lock("foo-1.0"), "sha256-deadbeef");
//! ```
//!
//! ## Design Notes
//!
//! - **No internal locking**: concurrent mutation must be serialized by the caller
//! - **Clone for isolation**: clones share no state with the original
//! - **All-or-nothing registration**: a conflicting call changes nothing

pub mod error;
pub mod section;
pub mod store;

pub use error::{Result, StoreError};
pub use section::ChecksumSection;
pub use store::ChecksumStore;
