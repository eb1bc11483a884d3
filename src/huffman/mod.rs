//! Canonical Huffman tree construction and decoding.
//!
//! Two cooperating pieces live here: [`TreeBuilder`], which turns a
//! `(code length, symbol)` description into a canonical code assignment, and
//! [`HuffmanTree`], the resulting compact decode table, queried by
//! presenting a 32-bit window prefix and getting back a symbol plus its code
//! length.

pub(crate) mod dictionary;

use crate::bitreader::BitReader;
use crate::error::{DatError, Result};

#[cfg(feature = "unstable_huffman_api")]
pub use dictionary::dictionary_tree;

/// Symbol values must fit in this many distinct codes (literal/length
/// alphabet size used throughout the format).
pub(crate) const MAX_SYMBOL_VALUE: usize = 285;

/// Code lengths are bounded by this value; also the dictionary alphabet's
/// "no code" sentinel length.
pub(crate) const MAX_CODE_BITS_LENGTH: u8 = 32;

const NONE: i16 = -1;

/// A canonical Huffman decode table.
///
/// Buckets are ordered by increasing code length (equivalently, decreasing
/// `threshold`); a query window belongs to the first bucket whose threshold
/// it is greater than or equal to.
#[cfg_attr(feature = "unstable_huffman_api", derive(Clone))]
pub struct HuffmanTree {
    threshold: Vec<u32>,
    length: Vec<u8>,
    symbol_offset: Vec<u16>,
    symbols: Vec<u16>,
}

impl HuffmanTree {
    /// Decodes one symbol from `reader`, returning the symbol and advancing
    /// past its code.
    pub fn read_code(&self, reader: &mut BitReader<'_>) -> Result<u16> {
        if self.threshold.is_empty() {
            return Err(DatError::EmptyTree);
        }

        reader.need(32)?;
        let window = reader.peek(32);

        let bucket = self
            .threshold
            .iter()
            .position(|&t| window >= t)
            .ok_or(DatError::InvalidStream)?;

        let len = self.length[bucket];
        let shift = (window - self.threshold[bucket]) >> (32 - len);
        let symbol_index = (self.symbol_offset[bucket] as u32)
            .checked_sub(shift)
            .ok_or(DatError::InvalidStream)?;
        let symbol = *self
            .symbols
            .get(symbol_index as usize)
            .ok_or(DatError::InvalidStream)?;

        reader.drop(len);
        Ok(symbol)
    }
}

/// Working tables used to assign canonical codes to a `(length, symbol)`
/// description, one insertion at a time.
///
/// Each length bucket is a push-front singly-linked list threaded through
/// `chain_next`, rooted at `chain_head[length]`. `NONE` (`-1`) marks an empty
/// slot, a sentinel outside the symbol domain.
pub struct TreeBuilder {
    chain_head: [i16; MAX_CODE_BITS_LENGTH as usize],
    chain_next: [i16; MAX_SYMBOL_VALUE],
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            chain_head: [NONE; MAX_CODE_BITS_LENGTH as usize],
            chain_next: [NONE; MAX_SYMBOL_VALUE],
        }
    }

    /// Registers one `(code_len, symbol)` pair.
    pub fn insert(&mut self, code_len: u8, symbol: u16) -> Result<()> {
        if code_len >= MAX_CODE_BITS_LENGTH || symbol as usize >= MAX_SYMBOL_VALUE {
            return Err(DatError::InvalidTreeDescription);
        }

        let head = &mut self.chain_head[code_len as usize];
        if *head == NONE {
            *head = symbol as i16;
        } else {
            self.chain_next[symbol as usize] = *head;
            *head = symbol as i16;
        }
        Ok(())
    }

    /// Assigns canonical codes to every registered `(length, symbol)` pair
    /// and builds the resulting decode table.
    ///
    /// Walking each length's chain in push-front order while decrementing
    /// the running code produces the exact canonical ordering the decoder
    /// expects: the most recently inserted symbol of a given length gets the
    /// numerically largest code of that length.
    pub fn build(self) -> HuffmanTree {
        let mut threshold = Vec::new();
        let mut length = Vec::new();
        let mut symbol_offset_table = Vec::new();
        let mut symbols = Vec::new();

        let mut code: u32 = 0;
        let mut symbol_offset: u16 = 0;

        for len in 0..MAX_CODE_BITS_LENGTH {
            let mut next = self.chain_head[len as usize];
            if next != NONE {
                while next != NONE {
                    let symbol = next as u16;
                    symbols.push(symbol);
                    symbol_offset += 1;
                    next = self.chain_next[symbol as usize];
                    code = code.wrapping_sub(1);
                }

                threshold.push((code.wrapping_add(1)) << (32 - len));
                length.push(len);
                symbol_offset_table.push(symbol_offset - 1);
            }

            code = (code << 1) + 1;
        }

        HuffmanTree {
            threshold,
            length,
            symbol_offset: symbol_offset_table,
            symbols,
        }
    }

    /// Test-only mirror of the code assignment walk in [`TreeBuilder::build`],
    /// returning `(symbol, code, length)` triples instead of a decode table.
    /// Lets tests derive the exact bit pattern for a symbol inserted into a
    /// builder without hand-computing canonical codes.
    #[cfg(test)]
    pub(crate) fn assign_canonical_codes(&self) -> Vec<(u16, u32, u8)> {
        let mut out = Vec::new();
        let mut code: u32 = 0;

        for len in 0..MAX_CODE_BITS_LENGTH {
            let mut next = self.chain_head[len as usize];
            while next != NONE {
                let symbol = next as u16;
                out.push((symbol, code, len));
                next = self.chain_next[symbol as usize];
                code = code.wrapping_sub(1);
            }
            code = (code << 1) + 1;
        }

        out
    }
}
