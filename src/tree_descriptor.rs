//! Reads, from the bit stream via the dictionary tree, the description of a
//! single per-block Huffman tree.

use crate::bitreader::BitReader;
use crate::error::{DatError, Result};
use crate::huffman::dictionary::dictionary_tree;
use crate::huffman::{HuffmanTree, TreeBuilder, MAX_SYMBOL_VALUE};

/// Parses one per-block tree description and builds the resulting tree.
///
/// Symbols are assigned in decreasing index order, from `n - 1` down to `0`;
/// each code read from the dictionary tree packs a code length (low 5 bits)
/// and a run length (high bits, plus one) describing how many successive
/// symbols share that length (or, when the length is zero, how many
/// successive symbols get no code at all).
pub(crate) fn parse_huffman_tree(reader: &mut BitReader<'_>) -> Result<HuffmanTree> {
    let symbol_count = reader.read(16)?;
    if symbol_count as usize > MAX_SYMBOL_VALUE {
        return Err(DatError::InvalidTreeDescription);
    }

    let mut builder = TreeBuilder::new();
    let mut remaining: i32 = symbol_count as i32 - 1;

    while remaining >= 0 {
        let code = dictionary_tree().read_code(reader)?;

        let code_len = (code & 0x1F) as u8;
        let mut run = (code >> 5) + 1;

        if code_len == 0 {
            remaining -= run as i32;
        } else {
            while run > 0 {
                if remaining < 0 {
                    return Err(DatError::InvalidTreeDescription);
                }
                builder.insert(code_len, remaining as u16)?;
                remaining -= 1;
                run -= 1;
            }
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tree description declaring zero symbols produces an empty tree
    /// without reading any dictionary codes.
    #[test]
    fn zero_symbols_is_trivially_valid() {
        // 16 bits of zero: symbol_count = 0, so remaining starts at -1 and
        // the decode loop never runs.
        let words = [0u32];
        let mut reader = BitReader::new(&words);
        let tree = parse_huffman_tree(&mut reader).unwrap();
        assert_eq!(tree.read_code(&mut reader), Err(DatError::EmptyTree));
    }

    #[test]
    fn rejects_too_many_symbols() {
        // symbol_count = 0xFFFF, far beyond MAX_SYMBOL_VALUE.
        let words = [0xFFFF_0000u32];
        let mut reader = BitReader::new(&words);
        assert_eq!(
            parse_huffman_tree(&mut reader),
            Err(DatError::InvalidTreeDescription)
        );
    }
}
