// Base64, hex and DEFLATE/zlib helpers over in-memory buffers.
//
// The plain `decode_*` functions and `inflate` are lossy: malformed input
// is logged at debug level and swallowed. Each has a `try_*` variant that
// surfaces the error instead.

use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, ZlibEncoder};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Base64
// ---------------------------------------------------------------------------

/// Encode `data` as padded standard base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode padded standard base64, returning an empty buffer on malformed input.
pub fn decode_base64(text: &str) -> Vec<u8> {
    try_decode_base64(text).unwrap_or_else(|e| {
        log::debug!("discarding malformed base64 input: {e}");
        Vec::new()
    })
}

/// Decode padded standard base64.
pub fn try_decode_base64(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

/// Encode `data` as lowercase hex.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode hex (either case), returning an empty buffer on malformed input.
pub fn decode_hex(text: &str) -> Vec<u8> {
    try_decode_hex(text).unwrap_or_else(|e| {
        log::debug!("discarding malformed hex input: {e}");
        Vec::new()
    })
}

/// Decode hex (either case).
pub fn try_decode_hex(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(text)?)
}

// ---------------------------------------------------------------------------
// DEFLATE / zlib
// ---------------------------------------------------------------------------

/// Compress `data` into a raw DEFLATE stream at best compression.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a raw DEFLATE stream.
///
/// On a corrupt or truncated stream, whatever was decoded before the error
/// is returned.
pub fn inflate(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    if let Err(e) = DeflateDecoder::new(data).read_to_end(&mut output) {
        log::debug!(
            "inflate stopped after {} bytes on malformed stream: {e}",
            output.len()
        );
    }
    output
}

/// Decompress a raw DEFLATE stream, failing on corrupt input.
pub fn try_inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    DeflateDecoder::new(data).read_to_end(&mut output)?;
    Ok(output)
}

/// Compress `data` into a zlib-wrapped stream at best compression.
pub fn zlib_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a zlib-wrapped stream. Header and Adler-32 trailer are checked.
pub fn zlib_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut output)?;
    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_known_values() {
        assert_eq!(encode_base64(b"hello"), "aGVsbG8=");
        assert_eq!(decode_base64("aGVsbG8="), b"hello");
        assert_eq!(encode_base64(b""), "");
    }

    #[test]
    fn base64_malformed_is_empty_or_error() {
        assert!(decode_base64("not base64!!").is_empty());
        assert!(try_decode_base64("not base64!!").is_err());
    }

    #[test]
    fn hex_known_values() {
        assert_eq!(encode_hex(b"\x00\xffAb"), "00ff4162");
        assert_eq!(decode_hex("00FF4162"), b"\x00\xffAb");
    }

    #[test]
    fn hex_malformed_is_empty_or_error() {
        assert!(decode_hex("abc").is_empty());
        assert!(decode_hex("zz").is_empty());
        assert!(matches!(
            try_decode_hex("zz"),
            Err(crate::Error::Decode(_))
        ));
    }

    #[test]
    fn deflate_inflate() {
        let data = b"abcabcabcabcabcabcabcabcabcabcabcabc".repeat(32);
        let packed = deflate(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(inflate(&packed), data);
        assert_eq!(try_inflate(&packed).unwrap(), data);
    }

    #[test]
    fn inflate_garbage_is_lossy_or_error() {
        let garbage = [0xffu8; 16];
        assert!(try_inflate(&garbage).is_err());
        assert!(inflate(&garbage).len() <= 16 * 1024);
    }

    #[test]
    fn zlib_stream_has_header_and_decodes() {
        let data = b"zlib payload zlib payload zlib payload";
        let packed = zlib_compress(data).unwrap();
        // CMF byte for deflate with a 32 KiB window.
        assert_eq!(packed[0], 0x78);
        assert_eq!(zlib_decompress(&packed).unwrap(), data);
        assert!(zlib_decompress(&deflate(data).unwrap()).is_err());
    }
}
