//! Format parsers and the registry that selects them.
//!
//! Each parser variant consumes one [`crate::streamer::ByteSource`] and
//! produces a typed [`ParsedRecord`]:
//!
//! - [`TextParser`] - verbatim text capture, no structural interpretation.
//! - [`PdbLikeParser`] - PDB-family fixed-column atomic structures
//!   (`pdb`, `pqr`, `pdbqt`).
//! - [`DxParser`] - OpenDX volumetric grids with ASCII sample data.
//! - [`DxbinParser`] - OpenDX volumetric grids with a binary sample block.
//!
//! [`FormatRegistry`] maps format tags to parser factories; construct one
//! with [`FormatRegistry::with_builtin_formats`] and pass it to whatever
//! needs to resolve tags.

pub use dx::{DxParser, VolumeHeader, VolumeRecord};
pub use dxbin::DxbinParser;
pub use error::ParseError;
pub use params::{DxOptions, ParserParams, PdbOptions, DEFAULT_HEADER_PROBE_BYTES};
pub use parser::{ParsedRecord, Parser};
pub use pdb::{Atom, ColumnSemantics, PdbLikeParser, StructureRecord};
pub use registry::FormatRegistry;
pub use text::{TextParser, TextRecord};

mod dx;
mod dxbin;
mod error;
mod params;
mod parser;
mod pdb;
mod registry;
mod text;

#[cfg(test)]
mod tests;
