//! # molvox - Molecular Structure and Volumetric Grid Parsing
//!
//! `molvox` turns raw byte payloads of scientific structural and volumetric
//! file formats into typed in-memory records: atomic structures from the
//! PDB family of fixed-column text formats (`pdb`, `pqr`, `pdbqt`) and
//! scalar volumetric grids from OpenDX text (`dx`) and binary (`dxbin`)
//! layouts.
//!
//! ## Key Features
//!
//! - **Chunk-safe streaming decode**: text is split into lines in bounded
//!   windows without losing or duplicating data at window boundaries, so
//!   the result never depends on the window size.
//!
//! - **Transparent decompression**: gzip-framed payloads are detected by
//!   their magic bytes and decompressed once, with the CRC trailer
//!   validated.
//!
//! - **Explicit format registry**: format tags map to parser factories in
//!   a registry value the caller owns; no hidden global state.
//!
//! - **Lookup primitives**: sorted-range binary searches, a bounded
//!   circular history buffer, and a structural-equality-keyed dictionary
//!   keep per-element and per-frame queries fast on large datasets.
//!
//! ## Quick Start
//!
//! ```rust
//! use molvox::formats::{FormatRegistry, ParsedRecord, Parser, ParserParams};
//! use molvox::streamer::ByteSource;
//!
//! let registry = FormatRegistry::with_builtin_formats();
//!
//! let line = "ATOM      1  CA  ALA A   1      11.000  12.000  13.000  1.00 20.00           C\n";
//! let source = ByteSource::from_text("example.pdb", line);
//!
//! let parser = registry.create("pdb", source, &ParserParams::default())?;
//! match parser.parse()? {
//!     ParsedRecord::Structure(structure) => assert_eq!(structure.atoms.len(), 1),
//!     other => panic!("unexpected record: {other:?}"),
//! }
//! # Ok::<(), molvox::formats::ParseError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`streamer`]: byte sources, gzip decompression, chunk-safe line
//!   splitting
//! - [`formats`]: the format registry, the parser contract, and the
//!   text/PDB-family/volumetric parser variants
//! - [`index`]: binary-search primitives over sorted ranges
//! - [`collections`]: ring buffer and structural dictionary
//! - [`arrays`]: typed numeric array selection by element kind
//!
//! Loading bytes from disk or network is deliberately out of scope: callers
//! materialize a [`streamer::ByteSource`] themselves and hand it to exactly
//! one parser. Parses are synchronous and run to completion; independent
//! parser instances may be driven concurrently as long as each owns its own
//! source.

pub mod arrays;
pub mod collections;
pub mod formats;
pub mod index;
pub mod streamer;
