//! Single-pass, multi-algorithm digest computation.
//!
//! Each chunk read from the source is fed to every requested engine, so a
//! large artifact is read once no matter how many algorithms are asked for.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};

use crate::algorithm::{digest_engine, Algorithm, DigestEngine};
use crate::error::{CoreError, Result};
use crate::source::FileSource;

/// Bytes read from the source per iteration.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Stream `source` to the end through one fresh engine per algorithm.
///
/// The engines are returned un-finalized; callers finalize at the point of
/// use. The source is rewound afterwards so later readers see every byte.
pub fn digests_from_source<S>(
    source: &mut S,
    algorithms: &[Algorithm],
) -> Result<BTreeMap<Algorithm, Box<dyn DigestEngine>>>
where
    S: FileSource + ?Sized,
{
    if algorithms.is_empty() {
        return Err(CoreError::NoAlgorithms);
    }

    let mut engines = BTreeMap::new();
    for algorithm in algorithms {
        if !engines.contains_key(algorithm) {
            engines.insert(algorithm.clone(), digest_engine(&algorithm.engine_name())?);
        }
    }

    let mut total = 0usize;
    {
        let reader = source.open()?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for engine in engines.values_mut() {
                engine.update(&buf[..n]);
            }
            total += n;
        }
    }
    source.rewind()?;

    tracing::trace!(
        source = %source.describe(),
        bytes = total,
        algorithms = engines.len(),
        "digested source"
    );

    Ok(engines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::source::ReaderSource;

    fn finalize(engines: BTreeMap<Algorithm, Box<dyn DigestEngine>>) -> BTreeMap<String, String> {
        engines
            .into_iter()
            .map(|(algo, engine)| (algo.to_string(), engine.finalize_hex()))
            .collect()
    }

    #[test]
    fn test_requires_algorithms() {
        let mut source = ReaderSource::new("empty", Cursor::new(Vec::new()));
        assert!(matches!(
            digests_from_source(&mut source, &[]),
            Err(CoreError::NoAlgorithms)
        ));
    }

    #[test]
    fn test_unsupported_algorithm() {
        let mut source = ReaderSource::new("empty", Cursor::new(Vec::new()));
        let md5 = Algorithm::new("md5").unwrap();
        assert!(matches!(
            digests_from_source(&mut source, &[md5]),
            Err(CoreError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let data = b"the same bytes".to_vec();
        let algos = [Algorithm::sha256()];

        let mut a = ReaderSource::new("a", Cursor::new(data.clone()));
        let mut b = ReaderSource::new("b", Cursor::new(data));
        let first = finalize(digests_from_source(&mut a, &algos).unwrap());
        let second = finalize(digests_from_source(&mut b, &algos).unwrap());

        assert_eq!(first, second);
    }

    #[test]
    fn test_multiple_chunks_single_pass() {
        // Spans several chunks with a ragged tail.
        let data: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let algos = [
            Algorithm::sha256(),
            Algorithm::new("sha512").unwrap(),
            Algorithm::new("blake3").unwrap(),
        ];

        let mut source = ReaderSource::new("big", Cursor::new(data.clone()));
        let digests = finalize(digests_from_source(&mut source, &algos).unwrap());
        assert_eq!(digests.len(), 3);

        let mut expected = digest_engine("SHA256").unwrap();
        expected.update(&data);
        assert_eq!(digests["sha256"], expected.finalize_hex());
        assert_eq!(digests["blake3"], blake3::hash(&data).to_hex().to_string());
    }

    #[test]
    fn test_rewinds_after_pass() {
        let mut source = ReaderSource::new("mem", Cursor::new(b"rewind me".to_vec()));
        digests_from_source(&mut source, &[Algorithm::sha256()]).unwrap();

        let mut rest = String::new();
        source.open().unwrap().read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "rewind me");
    }

    #[test]
    fn test_duplicate_algorithms_collapse() {
        let mut source = ReaderSource::new("mem", Cursor::new(b"x".to_vec()));
        let engines =
            digests_from_source(&mut source, &[Algorithm::sha256(), Algorithm::sha256()]).unwrap();
        assert_eq!(engines.len(), 1);
    }
}
