//! Throughput benchmark for `dat_inflate::decompress`.
//!
//! The format has no public sample corpus, so this benchmark synthesizes a
//! well-formed compressed stream itself: a handful of blocks, each
//! describing a flat-length literal tree through the real dictionary tree
//! and emitting a repeating byte pattern. Requires the `unstable_huffman_api`
//! feature, which exposes the decode-side Huffman machinery this generator
//! drives in reverse to pick bit patterns.

use bencher::{benchmark_group, benchmark_main, Bencher};
use dat_inflate::huffman_api::{dictionary_tree, BitReader, HuffmanTree, TreeBuilder};

/// Accumulates bits MSB-first and packs them into little-endian 32-bit
/// words, mirroring the wire format `BitReader` expects.
struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    fn new() -> Self {
        BitWriter { bits: Vec::new() }
    }

    fn push(&mut self, value: u32, bits: u8) {
        for i in (0..bits).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    fn finish(self) -> Vec<u8> {
        let mut words = Vec::new();
        for chunk in self.bits.chunks(32) {
            let mut word = 0u32;
            for (i, &bit) in chunk.iter().enumerate() {
                if bit {
                    word |= 1 << (31 - i);
                }
            }
            words.push(word);
        }
        words.push(0); // lookahead slack for the last code's 32-bit peek
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

/// Recovers the canonical `(code, length)` pair the dictionary tree assigns
/// to a raw descriptor-alphabet value by brute-force search: every code of
/// every length up to the tree's maximum either decodes to `symbol` or it
/// doesn't. The dictionary tree is tiny (256 entries) so this runs once at
/// setup time.
fn dictionary_code_for(tree: &HuffmanTree, symbol: u16) -> (u32, u8) {
    for len in 1..=20u8 {
        for code in 0..(1u32 << len) {
            let words = [code << (32 - len), 0];
            let mut reader = BitReader::new(&words);
            if let Ok(decoded) = tree.read_code(&mut reader) {
                if decoded == symbol {
                    return (code, len);
                }
            }
        }
    }
    panic!("symbol {symbol:#x} not present in dictionary tree");
}

/// Builds one compressed stream decoding to `total_bytes` bytes of a
/// 4-symbol repeating literal pattern (`0, 1, 2, 3, 0, 1, ...`).
fn synthesize_literal_stream(total_bytes: u32) -> Vec<u8> {
    let dict = dictionary_tree();

    let mut w = BitWriter::new();
    w.push(0, 32); // container header, discarded
    w.push(total_bytes, 32); // declared size
    w.push(0, 4); // reserved prelude bits
    w.push(0, 4); // write_size_constant_addition raw bits, unused here

    // One block covers the whole stream provided total_bytes fits the
    // (15+1) << 12 per-block symbol budget; benches stay well under that.
    assert!(total_bytes <= 16 << 12);

    w.push(4, 16); // symbol tree: 4 symbols described
    let (code, len) = dictionary_code_for(dict, 0x62); // code_len=2, run=4
    w.push(code, len);

    w.push(0, 16); // copy tree: no symbols, block never emits a back-reference

    w.push(15, 4); // max_count nibble -> (15+1) << 12, comfortably above total_bytes

    // The block loop assigns symbols in decreasing order (3, 2, 1, 0); derive
    // their canonical codes the same way so the emitted bits round-trip.
    let mut builder = TreeBuilder::new();
    builder.insert(2, 3).unwrap();
    builder.insert(2, 2).unwrap();
    builder.insert(2, 1).unwrap();
    builder.insert(2, 0).unwrap();
    let block_tree = builder.build();
    let codes: Vec<(u32, u8)> = (0..4u16)
        .map(|s| dictionary_code_for(&block_tree, s))
        .collect();

    for i in 0..total_bytes {
        let (code, len) = codes[(i % 4) as usize];
        w.push(code, len);
    }

    w.finish()
}

fn decompress_literal_block(bench: &mut Bencher) {
    let input = synthesize_literal_stream(32 * 1024);

    bench.iter(|| {
        let mut output_len = 0u32;
        let output = dat_inflate::decompress(&input, &mut output_len, 0).expect("decompress");
        assert_eq!(output_len as usize, output.len());
    });
}

benchmark_group!(benches, decompress_literal_block);
benchmark_main!(benches);
