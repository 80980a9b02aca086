//! PDB-family fixed-column structure parsing
//!
//! One parser covers the whole family. All siblings share the same column
//! offsets; what differs is the tag attached to the record and, for docking
//! inputs, the semantic label of two columns (see [`ColumnSemantics`]).

use log::{debug, warn};
use serde::Serialize;

use super::error::ParseError;
use super::params::{resolve_identity, ParserParams, PdbOptions};
use super::parser::{ParsedRecord, Parser};
use crate::streamer::{split_lines, ByteSource, Streamer};

/// Semantic interpretation of the two variant-dependent columns.
///
/// Column offsets never change between siblings; only the meaning attached
/// to columns 60..66 and 70..76 does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSemantics {
    /// Columns 60..66 hold the temperature factor; 70..76 is unused.
    Standard,
    /// Docking inputs: 70..76 holds an atom partial charge (empty in plain
    /// PDB files) and 60..66 an atom-type tag.
    ChargeTypeRemap,
}

/// One atom read from a fixed-column record.
#[derive(Debug, Clone, Serialize)]
pub struct Atom {
    pub serial: u32,
    pub name: String,
    pub alt_loc: Option<char>,
    pub res_name: String,
    pub chain_id: Option<char>,
    pub res_seq: i32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub occupancy: f32,
    /// Temperature factor ([`ColumnSemantics::Standard`] only).
    pub temp_factor: Option<f32>,
    /// Partial charge ([`ColumnSemantics::ChargeTypeRemap`] only).
    pub partial_charge: Option<f32>,
    /// Atom-type tag ([`ColumnSemantics::ChargeTypeRemap`] only).
    pub type_tag: Option<String>,
    pub element: String,
    /// True for HETATM records.
    pub hetero: bool,
}

/// Atomic structure parsed from a PDB-family source.
#[derive(Debug, Clone, Serialize)]
pub struct StructureRecord {
    pub name: String,
    pub path: String,
    /// Tag of the sibling that parsed the input. Column semantics follow the
    /// tag, never the content.
    pub format_tag: String,
    pub atoms: Vec<Atom>,
}

/// Parser for the PDB format family: `pdb`, `pqr`, `pdbqt`.
pub struct PdbLikeParser {
    streamer: Streamer,
    name: String,
    path: String,
    tag: &'static str,
    semantics: ColumnSemantics,
    options: PdbOptions,
}

impl PdbLikeParser {
    fn new(
        source: ByteSource,
        params: &ParserParams,
        tag: &'static str,
        semantics: ColumnSemantics,
    ) -> Self {
        let (name, path) = resolve_identity(&source, params);
        Self {
            streamer: Streamer::new(source),
            name,
            path,
            tag,
            semantics,
            options: PdbOptions::resolve(params),
        }
    }

    /// Plain PDB coordinate input.
    pub fn pdb(source: ByteSource, params: &ParserParams) -> Self {
        Self::new(source, params, "pdb", ColumnSemantics::Standard)
    }

    /// Continuum-electrostatics radii/charge input (APBS et al.). Identical
    /// column parsing to `pdb`, only the physical intent and tag differ.
    /// <http://www.poissonboltzmann.org/docs/file-format-info/>
    pub fn pqr(source: ByteSource, params: &ParserParams) -> Self {
        Self::new(source, params, "pqr", ColumnSemantics::Standard)
    }

    /// AutoDock variant of the PDB format with atom partial charges in the
    /// otherwise-empty charge column and atom types in the temperature-factor
    /// column.
    /// <http://autodock.scripps.edu/faqs-help/faq/what-is-the-format-of-a-pdbqt-file>
    pub fn pdbqt(source: ByteSource, params: &ParserParams) -> Self {
        Self::new(source, params, "pdbqt", ColumnSemantics::ChargeTypeRemap)
    }
}

impl Parser for PdbLikeParser {
    fn tag(&self) -> &'static str {
        self.tag
    }

    fn parse(self: Box<Self>) -> Result<ParsedRecord, ParseError> {
        let mut this = *self;
        debug!("parsing {} as {}", this.name, this.tag);
        let options = this.options;
        let semantics = this.semantics;

        let bytes = this.streamer.as_binary()?;
        let lines = split_lines(bytes, options.chunk_size, b'\n');

        let mut atoms = Vec::new();
        for (number, line) in lines.iter().enumerate() {
            if options.first_model_only && line.starts_with("ENDMDL") {
                break;
            }
            let hetero = line.starts_with("HETATM");
            if !hetero && !line.starts_with("ATOM  ") {
                continue;
            }
            let Some(atom) = parse_atom_record(line, semantics, hetero) else {
                warn!(
                    "{}: skipping malformed atom record on line {}",
                    this.name,
                    number + 1
                );
                continue;
            };
            if options.c_alpha_only && atom.name != "CA" {
                continue;
            }
            atoms.push(atom);
        }

        debug!("parsed {} atoms from {}", atoms.len(), this.name);
        Ok(ParsedRecord::Structure(StructureRecord {
            name: this.name,
            path: this.path,
            format_tag: this.tag.to_string(),
            atoms,
        }))
    }
}

/// Column slice, empty when the record is too short.
fn col(line: &str, start: usize, end: usize) -> &str {
    if start >= line.len() {
        return "";
    }
    line.get(start..end.min(line.len())).unwrap_or("")
}

fn single_char(field: &str) -> Option<char> {
    field.chars().next().filter(|c| !c.is_whitespace())
}

/// Read one `ATOM`/`HETATM` record. Returns `None` when the coordinate
/// columns cannot be read; other malformed fields fall back to defaults,
/// matching the tolerant behavior expected of structure viewers.
fn parse_atom_record(line: &str, semantics: ColumnSemantics, hetero: bool) -> Option<Atom> {
    let x = col(line, 30, 38).trim().parse::<f32>().ok()?;
    let y = col(line, 38, 46).trim().parse::<f32>().ok()?;
    let z = col(line, 46, 54).trim().parse::<f32>().ok()?;

    let name = col(line, 12, 16).trim().to_string();
    let column_a = col(line, 60, 66).trim();
    let column_b = col(line, 70, 76).trim();
    let (temp_factor, partial_charge, type_tag) = match semantics {
        ColumnSemantics::Standard => (column_a.parse::<f32>().ok(), None, None),
        ColumnSemantics::ChargeTypeRemap => (
            None,
            column_b.parse::<f32>().ok(),
            (!column_a.is_empty()).then(|| column_a.to_string()),
        ),
    };

    let mut element = col(line, 76, 78).trim().to_string();
    if element.is_empty() {
        // Fall back to the first alphabetic character of the atom name.
        element = name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(String::from)
            .unwrap_or_default();
    }

    Some(Atom {
        serial: col(line, 6, 11).trim().parse().unwrap_or(0),
        name,
        alt_loc: single_char(col(line, 16, 17)),
        res_name: col(line, 17, 20).trim().to_string(),
        chain_id: single_char(col(line, 21, 22)),
        res_seq: col(line, 22, 26).trim().parse().unwrap_or(0),
        x,
        y,
        z,
        occupancy: col(line, 54, 60).trim().parse().unwrap_or(1.0),
        temp_factor,
        partial_charge,
        type_tag,
        element,
        hetero,
    })
}
