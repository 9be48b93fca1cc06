// `key=value` configuration text.
//
// One pair per line, split on the first `=`. Keys and values are trimmed;
// lines without `=`, with an empty key, or with a key starting with `#` are
// skipped. A value wrapped in one pair of double quotes loses that pair.
// There is no escaping, so keys and values cannot span lines.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fetch::{self, FetchOptions, Location};
use crate::file;

/// Parsed configuration: key to value. Later duplicates win.
pub type Config = BTreeMap<String, String>;

/// Parse configuration text.
pub fn parse(text: &str) -> Config {
    let mut config = Config::new();
    for line in text.split('\n') {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || key.starts_with('#') {
            continue;
        }
        config.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    config
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Whether `parse` would hand back something other than `value` verbatim.
fn needs_quotes(value: &str) -> bool {
    value.trim() != value || unquote(value) != value
}

/// Serialize `config` as `key=value\n` lines, ordered by key.
///
/// Values that parsing would alter (surrounding whitespace, or already
/// wrapped in quotes) are written inside one pair of double quotes, so
/// `parse(&to_string(c)?) == c` for every representable config.
///
/// Fails with [`Error::InvalidArgument`] for a key the parser would not read
/// back: empty, starting with `#`, padded with whitespace, or containing `=`.
/// A newline in a key or value is rejected too.
pub fn to_string(config: &Config) -> Result<String> {
    let mut out = String::new();
    for (key, value) in config {
        if key.is_empty() || key.starts_with('#') || key.trim() != key {
            return Err(Error::InvalidArgument(format!(
                "key '{}' is empty, a comment or padded with whitespace",
                key.escape_debug()
            )));
        }
        if key.contains('=') {
            return Err(Error::InvalidArgument(format!("key '{key}' contains '='")));
        }
        if key.contains('\n') || value.contains('\n') {
            return Err(Error::InvalidArgument(format!(
                "entry '{}' contains a newline",
                key.escape_debug()
            )));
        }
        if needs_quotes(value) {
            let _ = writeln!(out, "{key}=\"{value}\"");
        } else {
            let _ = writeln!(out, "{key}={value}");
        }
    }
    Ok(out)
}

/// Fetch and parse the configuration behind `location`.
pub fn get(location: &Location, opts: &FetchOptions) -> Result<Config> {
    let text = fetch::get_string(location, opts)?;
    let config = parse(&text);
    log::debug!("{location}: parsed {} config entries", config.len());
    Ok(config)
}

/// Serialize `config` and write it to `path`, replacing any existing file.
pub fn set(path: &Path, config: &Config) -> Result<()> {
    let text = to_string(config)?;
    file::set_string(path, &text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
