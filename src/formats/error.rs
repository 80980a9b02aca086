use crate::streamer::StreamerError;

/// Errors that can occur while selecting or running a parser.
///
/// A failed parse never yields a partial record: every error here is fatal
/// to the parse that raised it.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The requested format tag has no registered parser factory.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// A volumetric header is missing required fields.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The data block is shorter than the header declares.
    #[error("truncated data block: expected {expected}, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    /// The underlying byte source could not be decoded.
    #[error(transparent)]
    Stream(#[from] StreamerError),

    /// I/O error while reading from an in-memory cursor.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
