/// Errors that can occur while accessing a byte source.
#[derive(Debug, thiserror::Error)]
pub enum StreamerError {
    /// Gzip framing is invalid: bad header, truncated deflate stream, or a
    /// CRC32/size trailer mismatch.
    #[error("corrupt compressed stream: {0}")]
    CorruptCompressedStream(#[source] std::io::Error),
}
