#![no_main]
use huffpack::{compress_bytes, decompress_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let packed = compress_bytes(data).expect("in-memory compress");
    let restored = decompress_bytes(&packed).expect("decompress own output");
    assert_eq!(data, restored.as_slice());
});
