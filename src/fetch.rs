// Resolving a path or URL to its byte content.
//
// A location string starting with `file://` is a local path with the prefix
// removed. Any other string containing `://` is fetched over HTTP(S).
// Everything else is a local path. Local reads are a single whole-file read;
// HTTP bodies are read in full or the fetch fails.
//
// `last_line()` and `tail_lines()` bound local reads to the final
// `LAST_LINE_WINDOW` bytes, so a last line longer than the window comes back
// truncated. URLs are always fetched whole.

use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;
use crate::lines;

/// Size of the trailing window scanned by [`last_line`] and [`tail_lines`]
/// for local files.
pub const LAST_LINE_WINDOW: u64 = 64 * 1024; // 64 KiB

const FILE_SCHEME: &str = "file://";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for fetching a [`Location`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Time allowed for the HTTP response headers to arrive. Does not bound
    /// the body transfer and is ignored for local files. `None` waits forever.
    pub header_timeout: Option<Duration>,
}

impl FetchOptions {
    /// Options with the given response-header timeout.
    pub fn with_header_timeout(timeout: Duration) -> Self {
        Self {
            header_timeout: Some(timeout),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Where fetched content lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A local filesystem path.
    File(PathBuf),
    /// An HTTP(S) URL.
    Url(String),
}

impl Location {
    /// Classify a path or URL string.
    pub fn parse(s: &str) -> Self {
        if let Some(path) = s.strip_prefix(FILE_SCHEME) {
            Self::File(PathBuf::from(path))
        } else if s.contains("://") {
            Self::Url(s.to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }

    /// The local path, if this is a file location.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Url(_) => None,
        }
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-content fetches
// ---------------------------------------------------------------------------

/// Fetch the full content behind `location`.
pub fn get_bytes(location: &Location, opts: &FetchOptions) -> Result<Vec<u8>> {
    match location {
        Location::File(path) => {
            log::debug!("reading local file {}", path.display());
            let data = std::fs::read(path)?;
            log::trace!("read {} bytes from {}", data.len(), path.display());
            Ok(data)
        }
        Location::Url(url) => http_get(url, opts),
    }
}

/// Fetch the full content behind `location` as text. Invalid UTF-8 sequences
/// are replaced with U+FFFD.
pub fn get_string(location: &Location, opts: &FetchOptions) -> Result<String> {
    let data = get_bytes(location, opts)?;
    Ok(match String::from_utf8(data) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Fetch the full content behind `location` and wrap it in an in-memory reader.
pub fn reader(location: &Location, opts: &FetchOptions) -> Result<Cursor<Vec<u8>>> {
    get_bytes(location, opts).map(Cursor::new)
}

#[cfg(feature = "http")]
fn http_get(url: &str, opts: &FetchOptions) -> Result<Vec<u8>> {
    log::debug!(
        "fetching {url} (header timeout: {:?})",
        opts.header_timeout
    );
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_recv_response(opts.header_timeout)
        .build()
        .into();
    let mut response = agent.get(url).call()?;
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()?;
    log::trace!("received {} bytes from {url}", body.len());
    Ok(body)
}

#[cfg(not(feature = "http"))]
fn http_get(url: &str, _opts: &FetchOptions) -> Result<Vec<u8>> {
    Err(crate::Error::Unsupported(format!(
        "cannot fetch {url}: built without the `http` feature"
    )))
}

// ---------------------------------------------------------------------------
// Trailing-window fetches
// ---------------------------------------------------------------------------

/// Read at most the final `len` bytes of a local file.
///
/// Returns the bytes and the file offset they start at.
fn read_window(path: &Path, len: u64) -> Result<(Vec<u8>, u64)> {
    let mut file = File::open(path)?;
    let size = file.metadata()?.len();
    let start = size.saturating_sub(len);
    if start > 0 {
        log::debug!(
            "{}: {size} bytes, scanning trailing window from offset {start}",
            path.display()
        );
        file.seek(SeekFrom::Start(start))?;
    }
    let mut data = Vec::with_capacity((size - start) as usize);
    file.read_to_end(&mut data)?;
    Ok((data, start))
}

/// Return the text after the final `\n` of the content behind `location`, or
/// the whole content if it has no newline.
///
/// Local files are read only within their final [`LAST_LINE_WINDOW`] bytes.
pub fn last_line(location: &Location, opts: &FetchOptions) -> Result<String> {
    let data = match location {
        Location::File(path) => read_window(path, LAST_LINE_WINDOW)?.0,
        Location::Url(_) => get_bytes(location, opts)?,
    };
    Ok(String::from_utf8_lossy(lines::after_last_newline(&data)).into_owned())
}

/// Return at most `n` lines from the end of the content behind `location`,
/// last line first, with the same line rules as [`lines::tail`].
///
/// Local files are read only within their final [`LAST_LINE_WINDOW`] bytes.
/// When that window starts in the middle of a line, the partial line is not
/// returned.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn tail_lines(location: &Location, n: usize, opts: &FetchOptions) -> Result<Vec<String>> {
    assert!(n > 0, "line count must be greater than zero");

    let (data, starts_at_line) = match location {
        Location::File(path) => {
            // One byte of lookbehind tells whether the window starts a line.
            let (mut data, offset) = read_window(path, LAST_LINE_WINDOW + 1)?;
            if offset > 0 {
                let starts_at_line = data.first() == Some(&b'\n');
                data.remove(0);
                (data, starts_at_line)
            } else {
                (data, true)
            }
        }
        Location::Url(_) => (get_bytes(location, opts)?, true),
    };

    let (mut found, rest) = lines::tail(&data, n);
    if !starts_at_line && rest.is_empty() && !data.is_empty() {
        found.pop();
    }
    Ok(found
        .into_iter()
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
