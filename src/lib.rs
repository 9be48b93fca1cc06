//! Dryio: small byte and file convenience helpers.
//!
//! The crate provides:
//! - Head/tail line extraction over byte buffers (`lines`)
//! - MD5 and CRC-64 checksums (`checksum`)
//! - Base64, hex and DEFLATE/zlib codecs (`codec`)
//! - Uniform fetching of local paths and URLs (`fetch`)
//! - Whole-file, JSON, XML, CSV and compressed file helpers (`file`)
//! - `key=value` config files (`config`)
//! - Directory listing (`dir`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use dryio::fetch::{self, FetchOptions, Location};
//! use dryio::lines;
//!
//! let log = Location::parse("/var/log/app.log");
//! let data = fetch::get_bytes(&log, &FetchOptions::default()).unwrap();
//! let (first, _rest) = lines::head(&data, 5);
//! let last = fetch::last_line(&log, &FetchOptions::default()).unwrap();
//! println!("{} head lines, last line: {last}", first.len());
//! ```

pub mod checksum;
pub mod codec;
pub mod config;
pub mod dir;
pub mod error;
pub mod fetch;
pub mod file;
pub mod lines;
pub mod source;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use fetch::{FetchOptions, Location};
pub use source::Source;
