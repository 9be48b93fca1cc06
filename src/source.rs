// Uniform `Read` access over the input kinds the helpers accept.

use std::fmt;
use std::io::{Cursor, Read};

/// Input that can be turned into a byte stream.
///
/// Anything `Display` (including error values) goes through [`Source::text`]
/// by rendering it first.
pub enum Source<'a> {
    /// Borrowed raw bytes.
    Bytes(&'a [u8]),
    /// Owned text, e.g. a rendered value.
    Text(String),
    /// An existing reader, passed through unchanged.
    Reader(Box<dyn Read + 'a>),
}

impl<'a> Source<'a> {
    /// Render any displayable value into a text source.
    pub fn text(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// Wrap an existing reader.
    pub fn reader(reader: impl Read + 'a) -> Self {
        Self::Reader(Box::new(reader))
    }

    /// Turn the source into a reader over its bytes.
    pub fn into_reader(self) -> Box<dyn Read + 'a> {
        match self {
            Self::Bytes(bytes) => Box::new(bytes),
            Self::Text(text) => Box::new(Cursor::new(text.into_bytes())),
            Self::Reader(reader) => reader,
        }
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Bytes(text.as_bytes())
    }
}

impl From<String> for Source<'_> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: Source<'_>) -> Vec<u8> {
        let mut out = Vec::new();
        source.into_reader().read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn every_variant_reads_back() {
        assert_eq!(drain(Source::from(&b"raw"[..])), b"raw");
        assert_eq!(drain(Source::from("text")), b"text");
        assert_eq!(drain(Source::from(String::from("owned"))), b"owned");
        assert_eq!(drain(Source::reader(&b"stream"[..])), b"stream");
    }

    #[test]
    fn display_values_render() {
        let err = std::io::Error::other("boom");
        assert_eq!(drain(Source::text(&err)), b"boom");
        assert_eq!(drain(Source::text(42)), b"42");
    }
}
