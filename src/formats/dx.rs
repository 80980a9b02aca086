//! OpenDX volumetric grids
//!
//! Shared header parsing for the `dx` (ASCII samples) and `dxbin` (binary
//! samples) variants, plus the ASCII variant itself. The header describes a
//! regular 3D grid: extents from the `object 1 ... counts nx ny nz` line,
//! grid placement from the `origin` and `delta` lines, and the `object 3`
//! line marking where sample data begins.

use log::debug;
use serde::Serialize;

use super::error::ParseError;
use super::params::{resolve_identity, DxOptions, ParserParams};
use super::parser::{ParsedRecord, Parser};
use crate::streamer::{split_lines, ByteSource, Streamer};

/// Grid geometry read from an OpenDX header.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VolumeHeader {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// Position of grid cell (0, 0, 0).
    pub origin: [f64; 3],
    /// Grid spacing along each axis (diagonal of the basis).
    pub delta: [f64; 3],
}

/// Scalar volumetric grid parsed from an OpenDX source.
#[derive(Debug, Clone, Serialize)]
pub struct VolumeRecord {
    pub name: String,
    pub path: String,
    pub header: VolumeHeader,
    /// Exactly `nx * ny * nz` samples. z varies fastest:
    /// `data[(x * ny + y) * nz + z]` is the sample at grid cell (x, y, z).
    pub data: Vec<f32>,
    /// Byte offset of the data block in the underlying buffer.
    pub header_byte_count: usize,
}

pub(super) struct HeaderScan {
    pub header: VolumeHeader,
    /// Cumulative byte length, newlines included, of every header line
    /// through the `object 3` marker.
    pub header_byte_count: usize,
    /// Index of the first sample line.
    pub data_line_start: usize,
}

/// Scan header lines for grid extents, placement, and the data marker.
///
/// Fails with [`ParseError::MalformedHeader`] when the extents or the
/// `object 3` marker are absent; origin and delta fall back to a unit grid
/// at the origin, since only extents and offset are essential.
pub(super) fn parse_header_lines(lines: &[String]) -> Result<HeaderScan, ParseError> {
    let mut extents: Option<(usize, usize, usize)> = None;
    let mut origin = [0.0f64; 3];
    let mut delta = [1.0f64; 3];
    let mut delta_line = 0usize;
    let mut header_byte_count = 0usize;

    for (index, line) in lines.iter().enumerate() {
        header_byte_count += line.len() + 1;
        if line.starts_with("object 1") {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let count = |i: usize| {
                tokens
                    .get(i)
                    .and_then(|t| t.parse::<usize>().ok())
                    .filter(|&n| n > 0)
            };
            extents = match (count(5), count(6), count(7)) {
                (Some(nx), Some(ny), Some(nz)) => Some((nx, ny, nz)),
                _ => {
                    return Err(ParseError::MalformedHeader(format!(
                        "unparsable grid extents: {line:?}"
                    )))
                }
            };
        } else if line.starts_with("origin") {
            let mut tokens = line.split_whitespace().skip(1);
            for slot in origin.iter_mut() {
                if let Some(value) = tokens.next().and_then(|t| t.parse().ok()) {
                    *slot = value;
                }
            }
        } else if line.starts_with("delta") && delta_line < 3 {
            // The k-th delta line carries the k-th diagonal component.
            if let Some(value) = line
                .split_whitespace()
                .nth(delta_line + 1)
                .and_then(|t| t.parse().ok())
            {
                delta[delta_line] = value;
            }
            delta_line += 1;
        } else if line.starts_with("object 3") {
            let (nx, ny, nz) = extents.ok_or_else(|| {
                ParseError::MalformedHeader(
                    "data section starts before grid extents were declared".to_string(),
                )
            })?;
            return Ok(HeaderScan {
                header: VolumeHeader {
                    nx,
                    ny,
                    nz,
                    origin,
                    delta,
                },
                header_byte_count,
                data_line_start: index + 1,
            });
        }
    }

    Err(ParseError::MalformedHeader(
        "no data section marker (`object 3`) found".to_string(),
    ))
}

/// Parser for OpenDX grids with ASCII sample data, three samples per line
/// after the `object 3` marker.
pub struct DxParser {
    streamer: Streamer,
    name: String,
    path: String,
    options: DxOptions,
}

impl DxParser {
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

impl Parser for DxParser {
    fn tag(&self) -> &'static str {
        "dx"
    }

    fn parse(self: Box<Self>) -> Result<ParsedRecord, ParseError> {
        let mut this = *self;
        debug!("parsing {} as dx", this.name);
        let options = this.options;

        let bytes = this.streamer.as_binary()?;
        let lines = split_lines(bytes, options.chunk_size, b'\n');
        let scan = parse_header_lines(&lines)?;
        let VolumeHeader { nx, ny, nz, .. } = scan.header;
        let size = nx * ny * nz;

        let mut data = Vec::with_capacity(size);
        'fill: for line in lines.iter().skip(scan.data_line_start) {
            for token in line.split_whitespace() {
                // Unparsable samples become NaN rather than aborting the grid.
                data.push(token.parse::<f32>().unwrap_or(f32::NAN));
                if data.len() == size {
                    break 'fill;
                }
            }
        }
        if data.len() < size {
            return Err(ParseError::TruncatedData {
                expected: size,
                actual: data.len(),
            });
        }

        debug!("decoded {nx}x{ny}x{nz} grid from {}", this.name);
        Ok(ParsedRecord::Volume(VolumeRecord {
            name: this.name,
            path: this.path,
            header: scan.header,
            data,
            header_byte_count: scan.header_byte_count,
        }))
    }
}
