use crate::streamer::{ByteSource, DEFAULT_CHUNK_SIZE};

/// Default length of the header probe window for binary volumetric input.
pub const DEFAULT_HEADER_PROBE_BYTES: usize = 1000;

/// Options accepted by [`crate::formats::FormatRegistry::create`].
///
/// Every option recognized by any variant appears here; unset fields take
/// the variant's own default. Each variant resolves only the keys it
/// recognizes, with a per-key present-vs-default merge. There is no deep
/// merging of nested blocks.
#[derive(Debug, Clone, Default)]
pub struct ParserParams {
    /// Record name; defaults to the source name.
    pub name: Option<String>,
    /// Record path; defaults to the source path.
    pub path: Option<String>,
    /// Stop reading atoms at the first ENDMDL record (PDB family).
    pub first_model_only: Option<bool>,
    /// Keep only CA atoms (PDB family).
    pub c_alpha_only: Option<bool>,
    /// Bytes probed for the text header of binary volumetric input.
    pub header_probe_bytes: Option<usize>,
    /// Window size for chunked line splitting.
    pub chunk_size: Option<usize>,
}

/// Resolved options of the PDB-family parser.
#[derive(Debug, Clone, Copy)]
pub struct PdbOptions {
    pub first_model_only: bool,
    pub c_alpha_only: bool,
    pub chunk_size: usize,
}

impl PdbOptions {
    /// Merge `params` over the variant defaults, key by key.
    pub fn resolve(params: &ParserParams) -> Self {
        Self {
            first_model_only: params.first_model_only.unwrap_or(false),
            c_alpha_only: params.c_alpha_only.unwrap_or(false),
            chunk_size: params.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        }
    }
}

/// Resolved options of the volumetric parsers.
#[derive(Debug, Clone, Copy)]
pub struct DxOptions {
    pub header_probe_bytes: usize,
    pub chunk_size: usize,
}

impl DxOptions {
    /// Merge `params` over the variant defaults, key by key.
    pub fn resolve(params: &ParserParams) -> Self {
        Self {
            header_probe_bytes: params
                .header_probe_bytes
                .unwrap_or(DEFAULT_HEADER_PROBE_BYTES),
            chunk_size: params.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        }
    }
}

/// Record name and path: explicit params win over the source's own identity.
pub(crate) fn resolve_identity(source: &ByteSource, params: &ParserParams) -> (String, String) {
    let name = params
        .name
        .clone()
        .unwrap_or_else(|| source.name().to_string());
    let path = params
        .path
        .clone()
        .unwrap_or_else(|| source.path().to_string());
    (name, path)
}
