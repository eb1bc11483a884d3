//! Decompressor for a proprietary game-asset `.dat` archive block encoding.
//!
//! The format layers an LZ77-style literal/back-reference scheme on top of
//! two cooperating canonical Huffman trees: a fixed, process-wide
//! "dictionary" tree that decodes the *descriptions* of per-block trees, and
//! a pair of per-block trees (one for literal/length symbols, one for
//! back-reference distances) that drive the actual expansion.
//!
//! This crate only implements the core block codec. The surrounding
//! container/archive format that frames these compressed blocks, any CLI or
//! file I/O, and application-level validation of the decompressed payload
//! are all the caller's responsibility.
//!
//! ```no_run
//! let compressed: &[u8] = &[]; // framed per the container format
//! let mut output_len = 0u32; // 0 => use the stream's declared size
//! let decoded = dat_inflate::decompress(compressed, &mut output_len, 0);
//! ```

mod bitreader;
mod error;
mod huffman;
mod inflate;
mod tree_descriptor;

pub use error::{DatError, Result};
pub use inflate::decompress;

/// Direct access to the bit-stream reader and canonical-Huffman machinery
/// underlying [`decompress`], for callers implementing their own block
/// loop (e.g. tooling that needs to inspect a per-block tree shape).
///
/// This API is unstable: the internal table layout may change without a
/// semver-major bump.
#[cfg(feature = "unstable_huffman_api")]
pub mod huffman_api {
    pub use crate::bitreader::BitReader;
    pub use crate::huffman::{dictionary_tree, HuffmanTree, TreeBuilder};
}
