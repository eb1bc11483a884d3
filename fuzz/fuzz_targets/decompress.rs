#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut output_len = 0u32;
    let _ = dat_inflate::decompress(data, &mut output_len, 0);
});
