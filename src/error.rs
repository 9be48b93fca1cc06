// Crate-wide error type.
//
// Every fallible helper propagates the first failing step unchanged; the
// variant only records which layer (filesystem, HTTP, codec, parser) failed.

use std::io;

/// Error returned by the fallible helpers in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem or stream I/O failure (open, read, write, stat, seek).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport failure while fetching a URL.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML (de)serialization failure.
    #[error("XML error: {0}")]
    Xml(String),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed base64 or hex input passed to a strict decoder.
    #[error("decode error: {0}")]
    Decode(String),

    /// The caller passed a value the operation cannot represent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation needs a capability that was compiled out.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Self::Decode(format!("base64: {e}"))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Self::Decode(format!("hex: {e}"))
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(e: quick_xml::DeError) -> Self {
        Self::Xml(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_and_displays() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: missing");
    }

    #[test]
    fn hex_error_is_decode() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, Error::Decode(ref m) if m.starts_with("hex:")));
    }
}
