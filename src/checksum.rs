// MD5 digests and CRC-64 checksums over in-memory bytes and fetched files.
//
// The CRC-64 parameters are the ECMA-182 polynomial in its reflected form
// with all-ones init and final xor (the catalogue name is CRC-64/XZ). The
// lookup table is built at compile time, so there is no lazy global.

use crc::{CRC_64_XZ, Crc};
use ::md5::{Digest, Md5};

use crate::error::Result;
use crate::fetch::{self, FetchOptions, Location};

/// CRC-64 (ECMA polynomial) engine with its table computed at compile time.
pub static CRC64_ECMA: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

/// MD5 digest of `data`.
pub fn md5(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

/// MD5 digest of `data` as 32 lowercase hex characters.
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5(data))
}

/// CRC-64 (ECMA) checksum of `data`.
pub fn crc64(data: &[u8]) -> u64 {
    CRC64_ECMA.checksum(data)
}

/// MD5 digest of the content behind `location`.
pub fn file_md5(location: &Location, opts: &FetchOptions) -> Result<[u8; 16]> {
    let data = fetch::get_bytes(location, opts)?;
    Ok(md5(&data))
}

/// MD5 digest of the content behind `location`, hex-encoded.
pub fn file_md5_hex(location: &Location, opts: &FetchOptions) -> Result<String> {
    file_md5(location, opts).map(hex::encode)
}

/// CRC-64 (ECMA) checksum of the content behind `location`.
pub fn file_crc64(location: &Location, opts: &FetchOptions) -> Result<u64> {
    let data = fetch::get_bytes(location, opts)?;
    Ok(crc64(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_known_vectors() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            md5_hex(b"The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn crc64_check_value() {
        assert_eq!(crc64(b"123456789"), 0x995D_C9BB_DF19_39FA);
        assert_eq!(crc64(b""), 0);
    }

    #[test]
    fn file_checksums_match_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"123456789").unwrap();

        let loc = Location::from(path.as_path());
        let opts = FetchOptions::default();
        assert_eq!(file_crc64(&loc, &opts).unwrap(), crc64(b"123456789"));
        assert_eq!(file_md5_hex(&loc, &opts).unwrap(), md5_hex(b"123456789"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let loc = Location::parse("/definitely/not/here.bin");
        let err = file_crc64(&loc, &FetchOptions::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
