//! Byte sources and streaming access
//!
//! A [`ByteSource`] owns the raw payload of a file that has already been
//! fetched or loaded by the caller. A [`Streamer`] wraps it and exposes the
//! payload as text or binary, transparently decompressing gzip-framed input.
//! Decompression runs at most once; the result is cached for later accessors.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::GzDecoder;
use log::debug;

pub use error::StreamerError;
pub use lines::{split_lines, DEFAULT_CHUNK_SIZE};

mod error;
mod lines;


/// Magic bytes at the start of a gzip member (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Raw payload of a source, either binary bytes or already-decoded text.
#[derive(Debug, Clone)]
pub enum SourceData {
    /// Binary payload, possibly gzip-framed.
    Binary(Vec<u8>),
    /// Text payload.
    Text(String),
}

/// An immutable, fully materialized file payload.
///
/// Created by an external loader (the CLI reads from disk; library users hand
/// in whatever bytes they have) and consumed by exactly one parser.
#[derive(Debug, Clone)]
pub struct ByteSource {
    name: String,
    path: String,
    data: SourceData,
    compressed: bool,
}

impl ByteSource {
    /// Create a source from raw bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: String::new(),
            data: SourceData::Binary(bytes),
            compressed: false,
        }
    }

    /// Create a source from already-decoded text.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: String::new(),
            data: SourceData::Text(text.into()),
            compressed: false,
        }
    }

    /// Attach the path the payload was loaded from.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Mark the payload as gzip-compressed even if the magic bytes are not
    /// checked first. Decompression also triggers on the magic alone.
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Identifying name of the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path the payload was loaded from, empty if unknown.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Streaming accessor over a [`ByteSource`].
///
/// Gzip framing is detected via the 2-byte magic header. The CRC32 and size
/// trailer of the gzip container are validated during decompression; a
/// mismatch surfaces as [`StreamerError::CorruptCompressedStream`] before any
/// accessor returns data.
#[derive(Debug)]
pub struct Streamer {
    source: ByteSource,
    decompressed: Option<Vec<u8>>,
}

impl Streamer {
    /// Wrap a byte source.
    pub fn new(source: ByteSource) -> Self {
        Self {
            source,
            decompressed: None,
        }
    }

    /// Identifying name of the underlying source.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Path of the underlying source, empty if unknown.
    pub fn path(&self) -> &str {
        self.source.path()
    }

    /// The raw payload bytes, decompressed if gzip-framed.
    pub fn as_binary(&mut self) -> Result<&[u8], StreamerError> {
        self.ensure_decompressed()?;
        match &self.decompressed {
            Some(bytes) => Ok(bytes),
            None => Ok(raw_bytes(&self.source)),
        }
    }

    /// The full decoded text of the payload, decompressed if gzip-framed.
    pub fn as_text(&mut self) -> Result<Cow<'_, str>, StreamerError> {
        Ok(String::from_utf8_lossy(self.as_binary()?))
    }

    fn ensure_decompressed(&mut self) -> Result<(), StreamerError> {
        if self.decompressed.is_some() {
            return Ok(());
        }
        let raw = raw_bytes(&self.source);
        if !self.source.compressed && !raw.starts_with(&GZIP_MAGIC) {
            return Ok(());
        }
        debug!("decompressing gzip payload of {}", self.source.name());
        let mut decoder = GzDecoder::new(raw);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(StreamerError::CorruptCompressedStream)?;
        self.decompressed = Some(out);
        Ok(())
    }
}

fn raw_bytes(source: &ByteSource) -> &[u8] {
    match &source.data {
        SourceData::Binary(bytes) => bytes,
        SourceData::Text(text) => text.as_bytes(),
    }
}
