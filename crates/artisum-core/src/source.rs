//! Byte sources the digest computer reads from.
//!
//! A source exposes exactly what a single digest pass needs: a readable
//! stream, and a way to put that stream back at its start afterwards.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// A rewindable byte stream with a provenance label.
pub trait FileSource {
    /// Where the bytes come from (a path, URL, or label). Recorded as the
    /// source of every checksum computed from this stream.
    fn describe(&self) -> String;

    /// The readable stream, positioned wherever the last reader left it.
    fn open(&mut self) -> io::Result<&mut dyn Read>;

    /// Reset the stream to its first byte.
    fn rewind(&mut self) -> io::Result<()>;
}

/// A regular file on disk, opened lazily on first read.
#[derive(Debug)]
pub struct PathSource {
    path: PathBuf,
    file: Option<File>,
}

impl PathSource {
    /// Create a source for `path`.
    ///
    /// Fails with [`CoreError::InvalidSource`] unless `path` is a regular file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CoreError::InvalidSource(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            file: None,
        })
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for PathSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&mut self) -> io::Result<&mut dyn Read> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::open(&self.path)?,
        };
        Ok(self.file.insert(file))
    }

    fn rewind(&mut self) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.seek(SeekFrom::Start(0))?;
        }
        Ok(())
    }
}

/// Any seekable reader paired with a label.
#[derive(Debug)]
pub struct ReaderSource<R> {
    label: String,
    reader: R,
}

impl<R: Read + Seek> ReaderSource<R> {
    /// Wrap `reader`, attributing its digests to `label`.
    pub fn new(label: impl Into<String>, reader: R) -> Self {
        Self {
            label: label.into(),
            reader,
        }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> FileSource for ReaderSource<R> {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn open(&mut self) -> io::Result<&mut dyn Read> {
        Ok(&mut self.reader)
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0)).map(|_| ())
    }
}
