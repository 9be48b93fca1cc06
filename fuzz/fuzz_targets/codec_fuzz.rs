#![no_main]
use dryio::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The lossy decoders must never panic, only come back short.
    let text = String::from_utf8_lossy(data);
    let _ = codec::decode_base64(&text);
    let _ = codec::decode_hex(&text);
    let _ = codec::inflate(data);
    let _ = codec::zlib_decompress(data);

    let packed = codec::deflate(data).unwrap();
    assert_eq!(codec::inflate(&packed), data);
});
