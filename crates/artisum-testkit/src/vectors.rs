//! Golden digest vectors.
//!
//! Published test vectors every registered digest engine must reproduce
//! when driven through the chunked digest computer.

use artisum_core::{digests_from_source, Algorithm};

use crate::fixtures::memory_source;

/// Input bytes for a vector.
#[derive(Debug, Clone, Copy)]
pub enum VectorInput {
    /// Literal bytes.
    Bytes(&'static [u8]),
    /// One byte repeated `count` times.
    Repeat(u8, usize),
}

impl VectorInput {
    pub fn bytes(&self) -> Vec<u8> {
        match *self {
            VectorInput::Bytes(bytes) => bytes.to_vec(),
            VectorInput::Repeat(byte, count) => vec![byte; count],
        }
    }
}

/// A golden digest vector.
#[derive(Debug, Clone)]
pub struct DigestVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Registry name of the algorithm.
    pub algorithm: &'static str,
    /// Input to digest.
    pub input: VectorInput,
    /// Expected lowercase hex digest.
    pub expected: &'static str,
}

/// Get all golden digest vectors.
pub fn all_vectors() -> Vec<DigestVector> {
    vec![
        DigestVector {
            name: "sha256 empty",
            algorithm: "sha256",
            input: VectorInput::Bytes(b""),
            expected: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        DigestVector {
            name: "sha256 abc",
            algorithm: "sha256",
            input: VectorInput::Bytes(b"abc"),
            expected: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        DigestVector {
            name: "sha256 two blocks",
            algorithm: "sha256",
            input: VectorInput::Bytes(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
            expected: "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
        },
        DigestVector {
            // Crosses many chunk boundaries.
            name: "sha256 one million a",
            algorithm: "sha256",
            input: VectorInput::Repeat(b'a', 1_000_000),
            expected: "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0",
        },
        DigestVector {
            name: "sha384 abc",
            algorithm: "sha384",
            input: VectorInput::Bytes(b"abc"),
            expected: "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
        },
        DigestVector {
            name: "sha512 empty",
            algorithm: "sha512",
            input: VectorInput::Bytes(b""),
            expected: "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        },
        DigestVector {
            name: "sha512 abc",
            algorithm: "sha512",
            input: VectorInput::Bytes(b"abc"),
            expected: "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        },
        DigestVector {
            name: "blake3 empty",
            algorithm: "blake3",
            input: VectorInput::Bytes(b""),
            expected: "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
        },
    ]
}

/// Compute a vector's digest through the digest computer.
pub fn compute_vector(vector: &DigestVector) -> Result<String, String> {
    let algorithm = Algorithm::new(vector.algorithm).map_err(|e| e.to_string())?;
    let mut source = memory_source(vector.name, &vector.input.bytes());
    let mut engines =
        digests_from_source(&mut source, std::slice::from_ref(&algorithm)).map_err(|e| e.to_string())?;
    let engine = engines
        .remove(&algorithm)
        .ok_or_else(|| format!("no engine returned for {algorithm}"))?;
    Ok(engine.finalize_hex())
}

/// Verify every vector, returning the names of those that mismatch.
pub fn verify_all_vectors() -> Result<(), Vec<String>> {
    let failures: Vec<String> = all_vectors()
        .iter()
        .filter(|v| compute_vector(v).as_deref() != Ok(v.expected))
        .map(|v| v.name.to_string())
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisum_core::CHUNK_SIZE;

    #[test]
    fn test_all_vectors_pass() {
        verify_all_vectors().unwrap();
    }

    #[test]
    fn test_long_vector_spans_chunks() {
        let longest = all_vectors()
            .into_iter()
            .map(|v| v.input.bytes().len())
            .max()
            .unwrap();
        assert!(longest > CHUNK_SIZE * 2);
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
