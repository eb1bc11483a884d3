//! Error types returned by this crate's decoder.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that may occur while decompressing a `.dat` block.
///
/// This taxonomy is stable: callers may match on it to recover from
/// malformed-stream conditions without inspecting `Display` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatError {
    /// The input length was not a multiple of four, or the input was empty
    /// where data was required.
    InvalidInput,
    /// The bit reader needed more bits than the input stream had left.
    Truncated,
    /// A per-block Huffman tree description was malformed: too many
    /// symbols, a code length out of range, or a symbol out of range.
    InvalidTreeDescription,
    /// A decode was attempted against a Huffman tree that was never built.
    EmptyTree,
    /// The decoded symbol/offset stream does not match any recognized
    /// length or distance encoding, or a back-reference would read before
    /// the start of the output buffer.
    InvalidStream,
    /// Allocation of the word buffer or the output buffer failed.
    OutOfMemory,
}

impl Error for DatError {}

impl Display for DatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DatError::InvalidInput => f.write_str("invalid input"),
            DatError::Truncated => f.write_str("truncated bit stream"),
            DatError::InvalidTreeDescription => f.write_str("invalid huffman tree description"),
            DatError::EmptyTree => f.write_str("read from an empty huffman tree"),
            DatError::InvalidStream => f.write_str("invalid compressed stream"),
            DatError::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, DatError>;
