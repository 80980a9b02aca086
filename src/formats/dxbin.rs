//! Binary OpenDX volumetric grids
//!
//! The dxbin layout keeps the ASCII OpenDX header but stores the sample
//! block as raw little-endian f64 values immediately after the `object 3`
//! line. See <https://github.com/Electrostatics/apbs-pdb2pqr/issues/216>.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use super::dx::{parse_header_lines, VolumeHeader, VolumeRecord};
use super::error::ParseError;
use super::params::{resolve_identity, DxOptions, ParserParams};
use super::parser::{ParsedRecord, Parser};
use crate::arrays::ArrayKind;
use crate::streamer::{split_lines, ByteSource, Streamer};

/// Parser for OpenDX grids with a binary sample block.
pub struct DxbinParser {
    streamer: Streamer,
    name: String,
    path: String,
    options: DxOptions,
}

impl DxbinParser {
    pub fn new(source: ByteSource, params: &ParserParams) -> Self {
        let (name, path) = resolve_identity(&source, params);
        Self {
            streamer: Streamer::new(source),
            name,
            path,
            options: DxOptions::resolve(params),
        }
    }
}

impl Parser for DxbinParser {
    fn tag(&self) -> &'static str {
        "dxbin"
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn parse(self: Box<Self>) -> Result<ParsedRecord, ParseError> {
        let mut this = *self;
        debug!("parsing {} as dxbin", this.name);
        let options = this.options;

        let bin = this.streamer.as_binary()?;

        // The text header sits in the first probe window; the window may be
        // shorter than the probe when the whole payload is, and longer
        // headers simply fail the scan below.
        let probe = &bin[..bin.len().min(options.header_probe_bytes)];
        let header_lines = split_lines(probe, options.chunk_size, b'\n');
        let scan = parse_header_lines(&header_lines)?;
        let VolumeHeader { nx, ny, nz, .. } = scan.header;

        let size = nx * ny * nz;
        let stride = ArrayKind::Float64.byte_size();
        let expected = scan.header_byte_count + size * stride;
        if bin.len() < expected {
            return Err(ParseError::TruncatedData {
                expected,
                actual: bin.len(),
            });
        }

        let mut cursor = Cursor::new(&bin[scan.header_byte_count..expected]);
        let mut data = Vec::with_capacity(size);
        for _ in 0..size {
            // Samples are stored as f64 and narrowed to f32 for consumers.
            data.push(cursor.read_f64::<LittleEndian>()? as f32);
        }

        debug!("decoded {nx}x{ny}x{nz} binary grid from {}", this.name);
        Ok(ParsedRecord::Volume(VolumeRecord {
            name: this.name,
            path: this.path,
            header: scan.header,
            data,
            header_byte_count: scan.header_byte_count,
        }))
    }
}
