//! The top-level block loop: read the two per-block Huffman trees, then
//! decode literals and back-references into the output buffer until the
//! target size is met.

use crate::bitreader::{words_from_bytes, BitReader};
use crate::error::{DatError, Result};
use crate::tree_descriptor::parse_huffman_tree;

/// Literal symbols below this value are emitted as-is; symbols at or above
/// it encode a length-class for a back-reference.
const LITERAL_LIMIT: u16 = 0x100;

/// Decompresses one `.dat` compressed block.
///
/// `output_len` is in/out: on input, `0` means "use the stream's declared
/// size"; a non-zero value caps the produced size. On return, it holds the
/// number of valid bytes actually written (`0` on failure).
///
/// `custom_cap`, when non-zero, sizes only the *allocation* of the returned
/// buffer. The number of bytes written is always `min(output_len,
/// declared_size)` (or just `declared_size` when `output_len` is `0`),
/// independent of `custom_cap`; a `custom_cap` larger than that count leaves
/// the tail of the buffer zeroed. `custom_cap` only ever widens the
/// allocation: a `custom_cap` smaller than the effective target size fails
/// with [`DatError::InvalidInput`] rather than silently shrinking how much
/// gets written.
pub fn decompress(input: &[u8], output_len: &mut u32, custom_cap: u32) -> Result<Vec<u8>> {
    let result = decompress_inner(input, *output_len, custom_cap);
    match result {
        Ok((buf, written)) => {
            *output_len = written;
            Ok(buf)
        }
        Err(e) => {
            *output_len = 0;
            Err(e)
        }
    }
}

fn decompress_inner(input: &[u8], output_len: u32, custom_cap: u32) -> Result<(Vec<u8>, u32)> {
    if input.is_empty() {
        return Err(DatError::InvalidInput);
    }
    let words = words_from_bytes(input)?;
    let mut reader = BitReader::new(&words);

    // Container header, discarded: framing is the caller's concern.
    reader.read(32)?;

    let declared_size = reader.read(32)?;

    let mut target = declared_size;
    if output_len != 0 && declared_size > output_len {
        target = output_len;
    }

    let alloc_size = if custom_cap > 0 {
        // The custom cap only ever widens the allocation (spec's "Custom
        // allocation law"); a cap narrower than the effective target would
        // leave nowhere to write the bytes the cap law still promises.
        if custom_cap < target {
            return Err(DatError::InvalidInput);
        }
        custom_cap
    } else {
        target
    };

    let mut output = vec![0u8; alloc_size as usize];
    let written = inflate_block_loop(&mut reader, &mut output[..target as usize])?;

    output.truncate(alloc_size as usize);
    Ok((output, written))
}

/// Runs the block loop, filling `output` and returning the number of bytes
/// written (always `output.len()` on success, since a well-formed stream
/// always has enough blocks to reach `target`).
fn inflate_block_loop(reader: &mut BitReader<'_>, output: &mut [u8]) -> Result<u32> {
    let target = output.len();

    reader.need(8)?;
    reader.drop(4);
    let write_size_constant_addition = reader.read(4)? + 1;

    let mut written = 0usize;

    while written < target {
        let symbol_tree = parse_huffman_tree(reader)?;
        let copy_tree = parse_huffman_tree(reader)?;

        let max_count = (reader.read(4)? + 1) << 12;
        let mut decoded = 0u32;

        while decoded < max_count && written < target {
            decoded += 1;

            let symbol = symbol_tree.read_code(reader)?;
            if symbol < LITERAL_LIMIT {
                output[written] = symbol as u8;
                written += 1;
                continue;
            }

            let write_size =
                decode_write_size(reader, symbol - LITERAL_LIMIT, write_size_constant_addition)?;

            let distance_symbol = copy_tree.read_code(reader)?;
            let write_offset = decode_write_offset(reader, distance_symbol)?;

            if write_offset as usize > written {
                return Err(DatError::InvalidStream);
            }

            let mut copied = 0u32;
            while copied < write_size && written < target {
                output[written] = output[written - write_offset as usize];
                written += 1;
                copied += 1;
            }
        }
    }

    Ok(written as u32)
}

/// Decodes the length-class symbol `s` (already offset by `0x100`) into a
/// back-reference length, per the quotient-indexed variable-length scheme.
fn decode_write_size(reader: &mut BitReader<'_>, s: u16, constant_addition: u32) -> Result<u32> {
    let quotient = s / 4;
    let remainder = s % 4;

    let mut write_size = match quotient {
        0 => s as u32,
        1..=6 => (1u32 << (quotient - 1)) * (4 + remainder as u32),
        7 if s == 28 => 0xFF,
        _ => return Err(DatError::InvalidStream),
    };

    if quotient > 1 && s != 28 {
        let extra_bits = (quotient - 1) as u8;
        write_size |= reader.read(extra_bits)?;
    }

    Ok(write_size + constant_addition)
}

/// Decodes a distance-class symbol into a back-reference offset, per the
/// quotient-indexed variable-length scheme.
fn decode_write_offset(reader: &mut BitReader<'_>, d: u16) -> Result<u32> {
    let quotient = d / 2;
    let remainder = d % 2;

    let mut write_offset = match quotient {
        0 => d as u32,
        1..=16 => (1u32 << (quotient - 1)) * (2 + remainder as u32),
        _ => return Err(DatError::InvalidStream),
    };

    if quotient > 1 {
        let extra_bits = (quotient - 1) as u8;
        write_offset |= reader.read(extra_bits)?;
    }

    Ok(write_offset + 1)
}
