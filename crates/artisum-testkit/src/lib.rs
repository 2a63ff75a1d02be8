//! # Artisum Testkit
//!
//! Testing utilities for Artisum.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known digests the engine registry must reproduce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: In-memory sources and a lockfile section builder
//!
//! ## Golden Vectors
//!
//! ```rust
//! use artisum_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! assert!(!all_vectors().is_empty());
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use artisum_testkit::generators::checksum;
//!
//! proptest! {
//!     #[test]
//!     fn lock_form_contains_digest(c in checksum()) {
//!         prop_assert!(c.to_lock().ends_with(c.digest()));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use artisum_testkit::fixtures::ChecksumsBuilder;
//!
//! let mut builder = ChecksumsBuilder::new();
//! builder.repo_artifact("foo", "1.0", None, b"foo contents");
//! builder.empty_artifact("bar", "2.0", Some("x86_64-linux"));
//! let section = builder.to_lock();
//! assert!(section.contains("  bar-2.0-x86_64-linux\n"));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{lock_name, memory_source, ChecksumsBuilder, MemorySource};
pub use generators::{checksum, hex_digest, ChecksumParams};
pub use vectors::{all_vectors, verify_all_vectors, DigestVector};
