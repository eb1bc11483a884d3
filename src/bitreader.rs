//! Word-oriented bit reader for the `.dat` block bit stream.
//!
//! The input is consumed as little-endian 32-bit words. A 64-bit logical
//! window (`head` on top of `buffer`) lets callers peek up to 32 bits ahead
//! of the next bit to be consumed, refilling one word at a time.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{DatError, Result};

/// Input words are grouped in chunks of this size; the word immediately
/// before each chunk boundary is a sentinel that must be skipped.
const SKIP_WORD_MODULUS: usize = 0x4000;

/// Reads bits MSB-first out of a little-endian 32-bit-word input stream.
pub struct BitReader<'a> {
    words: &'a [u32],
    input_size: usize,
    position: usize,
    head: u32,
    buffer: u32,
    available_bits: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over `words`, with nothing yet pulled into the
    /// window.
    pub fn new(words: &'a [u32]) -> Self {
        BitReader {
            words,
            input_size: words.len(),
            position: 0,
            head: 0,
            buffer: 0,
            available_bits: 0,
        }
    }

    /// Ensures at least `bits` bits are available in the window, pulling one
    /// more word if needed.
    ///
    /// `bits` must be in `1..=32`.
    pub fn need(&mut self, bits: u8) -> Result<()> {
        debug_assert!((1..=32).contains(&bits));
        if self.available_bits < bits {
            self.refill()?;
        }
        Ok(())
    }

    /// Returns the top `bits` bits of the window without consuming them.
    ///
    /// `bits` must be in `1..=32`.
    pub fn peek(&self, bits: u8) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        if bits == 32 {
            self.head
        } else {
            self.head >> (32 - bits)
        }
    }

    /// Removes the top `bits` bits from the window.
    ///
    /// `bits` must be in `1..=self.available_bits` (and `<= 32`, since no
    /// caller ever reads a wider span in one go).
    pub fn drop(&mut self, bits: u8) {
        debug_assert!(bits >= 1 && bits <= 32);
        debug_assert!(bits as u16 <= self.available_bits as u16);
        if bits == 32 {
            self.head = self.buffer;
            self.buffer = 0;
        } else {
            self.head = (self.head << bits) | (self.buffer >> (32 - bits));
            self.buffer <<= bits;
        }
        self.available_bits -= bits;
    }

    /// Reads and consumes `bits` bits, returning them as the low bits of the
    /// result.
    pub fn read(&mut self, bits: u8) -> Result<u32> {
        self.need(bits)?;
        let value = self.peek(bits);
        self.drop(bits);
        Ok(value)
    }

    /// Pulls one more 32-bit word into the window.
    fn refill(&mut self) -> Result<()> {
        if self.available_bits >= 32 {
            // Never called with a full top half; a caller asking for more
            // than is structurally possible indicates a corrupted stream.
            return Err(DatError::InvalidStream);
        }

        // Every SKIP_WORD_MODULUS-th word is a sentinel; pass over it.
        if (self.position + 1) % SKIP_WORD_MODULUS == 0 {
            self.position += 1;
        }

        if self.position >= self.input_size {
            return Err(DatError::Truncated);
        }

        let word = self.words[self.position];
        if self.available_bits == 0 {
            self.head = word;
            self.buffer = 0;
        } else {
            self.head |= word >> self.available_bits;
            self.buffer = word << (32 - self.available_bits);
        }
        self.available_bits += 32;
        self.position += 1;
        Ok(())
    }
}

/// Repacks a byte slice into little-endian 32-bit words.
///
/// `bytes.len()` must be a multiple of four.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return Err(DatError::InvalidInput);
    }
    Ok(bytes
        .chunks_exact(4)
        .map(LittleEndian::read_u32)
        .collect())
}
