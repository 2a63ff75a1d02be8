//! Proptest generators for property-based testing.

use proptest::prelude::*;

use artisum_core::{checksums_from_source, Algorithm, Checksum};

use crate::fixtures::memory_source;

/// Generate an algorithm with a registered digest engine.
pub fn supported_algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just("sha256"),
        Just("sha384"),
        Just("sha512"),
        Just("blake3"),
    ]
    .prop_map(|name| Algorithm::new(name).expect("registered names are valid"))
}

/// Generate any well-formed algorithm identifier, supported or not.
pub fn algorithm() -> impl Strategy<Value = Algorithm> {
    "[a-z][a-z0-9]{0,9}".prop_map(|name| Algorithm::new(&name).expect("pattern is valid"))
}

/// Generate a lowercase hex digest.
pub fn hex_digest() -> impl Strategy<Value = String> {
    "[0-9a-f]{8,128}".prop_map(String::from)
}

/// Generate a provenance label.
pub fn source_label() -> impl Strategy<Value = String> {
    prop_oneof![
        "https://[a-z]{3,10}\\.org/[a-z]{1,8}".prop_map(String::from),
        "/[a-z]{1,8}/[a-z]{1,8}\\.gem".prop_map(String::from),
        "[A-Z][a-z]{2,10}".prop_map(String::from),
    ]
}

/// Generate an artifact identifier.
pub fn artifact_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}-[0-9]\\.[0-9]{1,2}".prop_map(String::from)
}

/// Generate a checksum observed at one source.
pub fn checksum() -> impl Strategy<Value = Checksum> {
    (algorithm(), hex_digest(), source_label())
        .prop_map(|(algorithm, digest, source)| Checksum::new(algorithm, digest, source))
}

/// Generate artifact content bytes of specified max length.
pub fn contents(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for digesting one artifact from several sources.
#[derive(Debug, Clone)]
pub struct ChecksumParams {
    pub artifact: String,
    pub algorithms: Vec<Algorithm>,
    pub contents: Vec<u8>,
    pub sources: Vec<String>,
}

impl Arbitrary for ChecksumParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            artifact_name(),
            prop::collection::btree_set(supported_algorithm(), 1..=2),
            contents(4096),
            prop::collection::btree_set(source_label(), 1..=4),
        )
            .prop_map(|(artifact, algorithms, contents, sources)| ChecksumParams {
                artifact,
                algorithms: algorithms.into_iter().collect(),
                contents,
                sources: sources.into_iter().collect(),
            })
            .boxed()
    }
}

/// Digest the parameters' contents once per source.
pub fn checksums_from_params(params: &ChecksumParams) -> Vec<Vec<Checksum>> {
    params
        .sources
        .iter()
        .map(|source| {
            let mut reader = memory_source(source, &params.contents);
            checksums_from_source(&mut reader, &params.algorithms)
                .expect("supported algorithms always digest")
                .into_values()
                .collect()
        })
        .collect()
}
