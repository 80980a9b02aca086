//! Chunk-safe line splitting
//!
//! Converts a byte sequence, processed in fixed-size windows, into the same
//! ordered sequence of logical lines that a single-pass decode-and-split
//! would produce. Lines that straddle a window boundary are stitched back
//! together by carrying the partial tail of each window into the next.

/// Default window size for chunked line splitting (10 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024 * 1024;

/// Split `bytes` into logical lines, processing at most `chunk_size` bytes
/// per window.
///
/// The output is independent of `chunk_size`: a window with no newline only
/// extends the carried partial line, and a non-empty partial left after the
/// last window is emitted as a final unterminated line. A trailing newline
/// does not produce a trailing empty line. Bytes are decoded lossily as
/// UTF-8 at line granularity, so multi-byte sequences are unaffected by
/// window boundaries. This never fails; an empty input yields no lines.
pub fn split_lines(bytes: &[u8], chunk_size: usize, newline: u8) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let mut lines = Vec::new();
    let mut partial: Vec<u8> = Vec::new();

    let mut offset = 0;
    while offset < bytes.len() {
        let window = &bytes[offset..bytes.len().min(offset + chunk_size)];
        match window.iter().rposition(|&b| b == newline) {
            None => partial.extend_from_slice(window),
            Some(idx) => {
                let mut complete = std::mem::take(&mut partial);
                complete.extend_from_slice(&window[..idx]);
                for piece in complete.split(|&b| b == newline) {
                    lines.push(String::from_utf8_lossy(piece).into_owned());
                }
                partial.extend_from_slice(&window[idx + 1..]);
            }
        }
        offset += chunk_size;
    }

    if !partial.is_empty() {
        lines.push(String::from_utf8_lossy(&partial).into_owned());
    }

    lines
}
