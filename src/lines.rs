// Head/tail line extraction over byte buffers.
//
// Both directions split on `\n` and drop a `\r` sitting directly before the
// `\n`. The newline itself never belongs to a returned line. Lines are
// returned as sub-slices of the input, so no bytes are copied and invalid
// UTF-8 passes through untouched.

/// Upper bound on the up-front line buffer; larger counts grow on demand.
const PREALLOC_LINES: usize = 256;

/// Strip a single `\r` that directly precedes a line's terminating `\n`.
#[inline]
fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Return at most `n` lines from the start of `data`, plus the unscanned rest.
///
/// Only `\n`-terminated lines count; an unterminated trailing segment stays in
/// `rest`. `rest` always starts right after the last consumed `\n` (or is the
/// whole buffer when no newline was found). Resembles the Unix `head` command.
///
/// ```
/// let (lines, rest) = dryio::lines::head(b"a\nb\r\nc", 2);
/// assert_eq!(lines, [&b"a"[..], b"b"]);
/// assert_eq!(rest, b"c");
/// ```
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn head(data: &[u8], n: usize) -> (Vec<&[u8]>, &[u8]) {
    assert!(n > 0, "line count must be greater than zero");

    let mut lines = Vec::with_capacity(n.min(PREALLOC_LINES));
    let mut begin = 0;
    while lines.len() < n {
        let Some(offset) = data[begin..].iter().position(|&b| b == b'\n') else {
            break;
        };
        let end = begin + offset;
        lines.push(strip_cr(&data[begin..end]));
        begin = end + 1;
    }
    (lines, &data[begin..])
}

/// Return at most `n` lines from the end of `data`, plus the unscanned prefix.
///
/// Lines come back last physical line first. A `\n` at the very end of the
/// buffer terminates the final line rather than opening an empty one, and the
/// segment before the first `\n` is a line too, so asking for at least as
/// many lines as the buffer holds leaves an empty prefix. The prefix keeps the
/// newline that bounded the earliest returned line. Resembles the Unix `tail`
/// command.
///
/// ```
/// let (lines, rest) = dryio::lines::tail(b"a\nb\r\nc", 1);
/// assert_eq!(lines, [&b"c"[..]]);
/// assert_eq!(rest, b"a\nb\r\n");
/// ```
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn tail(data: &[u8], n: usize) -> (Vec<&[u8]>, &[u8]) {
    assert!(n > 0, "line count must be greater than zero");

    let mut lines = Vec::with_capacity(n.min(PREALLOC_LINES));
    let mut rest_len = data.len();
    if data.is_empty() {
        return (lines, data);
    }

    // `end` is the exclusive end of the line currently being located.
    let mut end = data.len();
    if data[end - 1] == b'\n' {
        end -= 1;
    }

    while lines.len() < n {
        let terminated = end < data.len();
        match data[..end].iter().rposition(|&b| b == b'\n') {
            Some(nl) => {
                let line = &data[nl + 1..end];
                lines.push(if terminated { strip_cr(line) } else { line });
                rest_len = nl + 1;
                end = nl;
            }
            None => {
                let line = &data[..end];
                lines.push(if terminated { strip_cr(line) } else { line });
                rest_len = 0;
                break;
            }
        }
    }
    (lines, &data[..rest_len])
}

/// Return the bytes after the final `\n` of `data`, or all of `data` when it
/// holds no newline.
pub fn after_last_newline(data: &[u8]) -> &[u8] {
    match data.iter().rposition(|&b| b == b'\n') {
        Some(pos) => &data[pos + 1..],
        None => data,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
