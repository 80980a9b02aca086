use serde::Serialize;

use super::dx::VolumeRecord;
use super::error::ParseError;
use super::pdb::StructureRecord;
use super::text::TextRecord;

/// Typed output of a completed parse. Opaque to the base contract; the
/// concrete shape depends on the variant that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParsedRecord {
    /// Verbatim text capture.
    Text(TextRecord),
    /// Per-atom structure from a PDB-family format.
    Structure(StructureRecord),
    /// Scalar volumetric grid.
    Volume(VolumeRecord),
}

/// Base contract of all format parsers.
///
/// A parser is constructed with a [`crate::streamer::ByteSource`] and an
/// options block, runs once, and produces its record exactly once:
/// [`Parser::parse`] consumes the instance, so the
/// `constructed -> parsing -> parsed | failed` lifecycle cannot be re-entered
/// without constructing a new parser, and no accumulated output can be
/// appended twice. A failed parse yields no record at all.
pub trait Parser {
    /// Format tag this parser handles.
    fn tag(&self) -> &'static str;

    /// Whether the variant consumes a binary payload.
    fn is_binary(&self) -> bool {
        false
    }

    /// Run the parse to completion.
    fn parse(self: Box<Self>) -> Result<ParsedRecord, ParseError>;
}
