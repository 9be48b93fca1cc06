// File-level helpers: whole-file writes and appends, structured formats
// (JSON, XML, CSV), compressed files, and stat-style queries.
//
// Readers take a `Location` and go through `fetch`, so they work for local
// paths and URLs alike. Writers take a local `Path`. Every handle is opened,
// used and dropped inside the call.

use std::fmt;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use flate2::Compression;
use flate2::write::{DeflateEncoder, ZlibEncoder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec;
use crate::error::{Error, Result};
use crate::fetch::{self, FetchOptions, Location};

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Raw bytes and text
// ---------------------------------------------------------------------------

/// Write `data` to `path`, creating or truncating it.
pub fn set_bytes(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;
    Ok(())
}

/// Write `text` to `path`, creating or truncating it.
pub fn set_string(path: &Path, text: &str) -> Result<()> {
    set_bytes(path, text.as_bytes())
}

/// Append `data` to `path`, creating it if missing.
pub fn append_bytes(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(data)?;
    Ok(())
}

/// Append `text` to `path`, creating it if missing.
pub fn append_string(path: &Path, text: &str) -> Result<()> {
    append_bytes(path, text.as_bytes())
}

/// Write formatted output over the start of an existing file.
///
/// The file is neither created nor truncated. Use with `format_args!`.
pub fn write_fmt(path: &Path, args: fmt::Arguments<'_>) -> Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.write_fmt(args)?;
    Ok(())
}

/// Append formatted output to `path`, creating it if missing.
pub fn append_fmt(path: &Path, args: fmt::Arguments<'_>) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_fmt(args)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Fetch and deserialize JSON into `T`.
pub fn get_json<T: DeserializeOwned>(location: &Location, opts: &FetchOptions) -> Result<T> {
    let data = fetch::get_bytes(location, opts)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Fetch JSON without a target type.
pub fn get_json_value(location: &Location, opts: &FetchOptions) -> Result<serde_json::Value> {
    get_json(location, opts)
}

/// Serialize `value` as compact JSON into `path`.
pub fn set_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec(value)?;
    set_bytes(path, &data)
}

// ---------------------------------------------------------------------------
// XML
// ---------------------------------------------------------------------------

/// Fetch and deserialize XML into `T`. Text that is not valid UTF-8 is an
/// error rather than being replaced.
pub fn get_xml<T: DeserializeOwned>(location: &Location, opts: &FetchOptions) -> Result<T> {
    let data = fetch::get_bytes(location, opts)?;
    Ok(quick_xml::de::from_reader(data.as_slice())?)
}

/// Serialize `value` as XML into `path`. The root element is named after the type.
pub fn set_xml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = quick_xml::se::to_string(value).map_err(|e| Error::Xml(e.to_string()))?;
    set_string(path, &text)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Fetch CSV records. There is no header row, and every record must have the
/// same number of fields as the first.
pub fn get_csv(location: &Location, opts: &FetchOptions) -> Result<Vec<Vec<String>>> {
    let data = fetch::get_bytes(location, opts)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data.as_slice());
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Write `records` as CSV into `path`, creating or truncating it.
pub fn set_csv<R: AsRef<[String]>>(path: &Path, records: &[R]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.write_record(record.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Compressed files
// ---------------------------------------------------------------------------

/// Fetch a raw DEFLATE stream and decompress it.
pub fn get_deflate(location: &Location, opts: &FetchOptions) -> Result<Vec<u8>> {
    let data = fetch::get_bytes(location, opts)?;
    codec::try_inflate(&data)
}

/// Compress `data` as raw DEFLATE (best compression) into `path`.
pub fn set_deflate(path: &Path, data: &[u8]) -> Result<()> {
    let writer = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    let mut encoder = DeflateEncoder::new(writer, Compression::best());
    encoder.write_all(data)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Fetch a zlib stream and decompress it.
pub fn get_zlib(location: &Location, opts: &FetchOptions) -> Result<Vec<u8>> {
    let data = fetch::get_bytes(location, opts)?;
    codec::zlib_decompress(&data)
}

/// Compress `data` as zlib (best compression) into `path`.
pub fn set_zlib(path: &Path, data: &[u8]) -> Result<()> {
    let writer = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    let mut encoder = ZlibEncoder::new(writer, Compression::best());
    encoder.write_all(data)?;
    encoder.finish()?.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Stat-style queries
// ---------------------------------------------------------------------------

/// Whether `path` can be stat'ed.
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Whether `path` exists and is a directory.
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_dir())
}

/// Size of `path` in bytes, or `None` if it cannot be stat'ed.
pub fn size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}

/// Modification time of `path`, or `None` if unavailable.
pub fn time_modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// First `dir/name` that exists, trying `search_dirs` in order.
pub fn find<P: AsRef<Path>>(search_dirs: &[P], name: &str) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|dir| dir.as_ref().join(name))
        .find(|candidate| exists(candidate))
}

/// Set the access and modification times of `path` to now, creating an
/// empty file if it does not exist.
pub fn touch(path: &Path) -> Result<()> {
    if !exists(path) {
        File::create(path)?;
        return Ok(());
    }
    // Explicit timestamps need ownership, not write access.
    let now = SystemTime::now();
    let file = File::open(path)?;
    file.set_times(FileTimes::new().set_accessed(now).set_modified(now))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
