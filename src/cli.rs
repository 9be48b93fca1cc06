// Command-line front end for the dryio helpers.
//
// One subcommand per helper family. Inputs are locations (local path,
// `file://` path or URL); outputs are local paths or stdout. Failures print
// `dryio: <context>: <error>` and exit with status 1.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::fetch::{self, FetchOptions, Location};
use crate::{checksum, codec, config, dir, file, lines};

const BUF_SIZE: usize = 64 * 1024;
const DEFAULT_LINES: u64 = 10;

// ---------------------------------------------------------------------------
// Duration parsing (supports ms, s, m suffixes; bare numbers are seconds)
// ---------------------------------------------------------------------------

fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".into());
    }
    let (num_part, unit_ms) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1u64)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1000)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60 * 1000)
    } else {
        (s, 1000)
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid duration '{s}': {e}"))?;
    num.checked_mul(unit_ms)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("duration overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Byte and file convenience helpers.
#[derive(Parser, Debug)]
#[command(
    name = "dryio",
    version,
    about = "Byte and file convenience helpers",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,

    /// Response-header timeout for URL inputs (e.g. 500ms, 5s, 1m).
    #[arg(long, global = true, value_parser = parse_duration)]
    timeout: Option<Duration>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the first lines of an input.
    Head(LinesArgs),
    /// Print the last lines of an input.
    Tail(LinesArgs),
    /// Print the text after the final newline of an input.
    LastLine(LocationArgs),
    /// Print the MD5 digest of an input.
    Md5(LocationArgs),
    /// Print the CRC-64 (ECMA) checksum of an input.
    Crc64(LocationArgs),
    /// Base64-encode an input, or decode with --decode.
    Base64(CodecArgs),
    /// Hex-encode an input, or decode with --decode.
    Hex(CodecArgs),
    /// Compress an input into a raw DEFLATE file.
    Deflate(TransformArgs),
    /// Decompress a raw DEFLATE input into a file.
    Inflate(TransformArgs),
    /// Compress an input into a zlib file.
    Zlib(TransformArgs),
    /// Decompress a zlib input into a file.
    Unzlib(TransformArgs),
    /// Parse a key=value config input and print it normalized.
    Config(LocationArgs),
    /// List directory entries.
    Ls(LsArgs),
    /// Create a file or update its timestamps.
    Touch(TouchArgs),
}

#[derive(Args, Debug)]
struct LocationArgs {
    /// Input path, file:// path, or URL.
    #[arg(value_hint = ValueHint::AnyPath)]
    input: String,
}

#[derive(Args, Debug)]
struct LinesArgs {
    /// Number of lines.
    #[arg(short = 'n', long = "lines", value_parser = clap::value_parser!(u64).range(1..), default_value_t = DEFAULT_LINES)]
    lines: u64,

    /// Input path, file:// path, or URL.
    #[arg(value_hint = ValueHint::AnyPath)]
    input: String,
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// Decode instead of encode (malformed input is an error).
    #[arg(short = 'd', long)]
    decode: bool,

    /// Input path, file:// path, or URL.
    #[arg(value_hint = ValueHint::AnyPath)]
    input: String,
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Input path, file:// path, or URL.
    #[arg(value_hint = ValueHint::AnyPath)]
    input: String,

    /// Output file.
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct LsArgs {
    /// Only list entries that are not directories.
    #[arg(long, conflicts_with = "dirs")]
    files: bool,

    /// Only list directories.
    #[arg(long)]
    dirs: bool,

    /// Directory to list.
    #[arg(value_hint = ValueHint::DirPath, default_value = ".")]
    dir: PathBuf,
}

#[derive(Args, Debug)]
struct TouchArgs {
    /// File to create or touch.
    #[arg(value_hint = ValueHint::FilePath)]
    path: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved global options
// ---------------------------------------------------------------------------

struct Options {
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    fetch: FetchOptions,
}

fn resolve_options(cli: &Cli) -> Options {
    Options {
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        fetch: FetchOptions {
            header_timeout: cli.timeout,
        },
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn fail(context: &str, e: impl std::fmt::Display) -> i32 {
    eprintln!("dryio: {context}: {e}");
    1
}

fn write_stdout(data: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::with_capacity(BUF_SIZE, io::stdout().lock());
    out.write_all(data)?;
    out.flush()
}

fn emit_stats(opts: &Options, stats: serde_json::Value) {
    if opts.json_output {
        eprintln!("{stats:#}");
    }
}

fn check_output(opts: &Options, path: &Path) -> Result<(), String> {
    if path.exists() && !opts.force {
        return Err(format!(
            "output file exists, use -f to overwrite: {}",
            path.display()
        ));
    }
    Ok(())
}

fn join_lines<'a>(found: impl Iterator<Item = &'a [u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    for line in found {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Line commands
// ---------------------------------------------------------------------------

fn cmd_head(opts: &Options, args: &LinesArgs) -> i32 {
    let location = Location::parse(&args.input);
    let data = match fetch::get_bytes(&location, &opts.fetch) {
        Ok(d) => d,
        Err(e) => return fail(&args.input, e),
    };
    let (found, rest) = lines::head(&data, args.lines as usize);
    if let Err(e) = write_stdout(&join_lines(found.iter().copied())) {
        return fail("stdout", e);
    }
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "dryio: head: {} lines, {} bytes unscanned",
            found.len(),
            rest.len()
        );
    }
    emit_stats(
        opts,
        serde_json::json!({
            "command": "head",
            "input": args.input,
            "lines": found.len(),
            "rest_bytes": rest.len(),
        }),
    );
    0
}

fn cmd_tail(opts: &Options, args: &LinesArgs) -> i32 {
    let location = Location::parse(&args.input);
    let found = match fetch::tail_lines(&location, args.lines as usize, &opts.fetch) {
        Ok(f) => f,
        Err(e) => return fail(&args.input, e),
    };
    let text = join_lines(found.iter().rev().map(|l| l.as_bytes()));
    if let Err(e) = write_stdout(&text) {
        return fail("stdout", e);
    }
    if opts.verbose > 0 && !opts.quiet {
        eprintln!("dryio: tail: {} lines", found.len());
    }
    emit_stats(
        opts,
        serde_json::json!({
            "command": "tail",
            "input": args.input,
            "lines": found.len(),
        }),
    );
    0
}

fn cmd_last_line(opts: &Options, args: &LocationArgs) -> i32 {
    let location = Location::parse(&args.input);
    match fetch::last_line(&location, &opts.fetch) {
        Ok(line) => {
            if let Err(e) = write_stdout(format!("{line}\n").as_bytes()) {
                return fail("stdout", e);
            }
            emit_stats(
                opts,
                serde_json::json!({
                    "command": "last-line",
                    "input": args.input,
                    "length": line.len(),
                }),
            );
            0
        }
        Err(e) => fail(&args.input, e),
    }
}

// ---------------------------------------------------------------------------
// Checksum and codec commands
// ---------------------------------------------------------------------------

fn cmd_md5(opts: &Options, args: &LocationArgs) -> i32 {
    match checksum::file_md5_hex(&Location::parse(&args.input), &opts.fetch) {
        Ok(digest) => {
            println!("{digest}");
            0
        }
        Err(e) => fail(&args.input, e),
    }
}

fn cmd_crc64(opts: &Options, args: &LocationArgs) -> i32 {
    match checksum::file_crc64(&Location::parse(&args.input), &opts.fetch) {
        Ok(sum) => {
            println!("{sum:016x}");
            0
        }
        Err(e) => fail(&args.input, e),
    }
}

fn run_codec(
    opts: &Options,
    args: &CodecArgs,
    encode: fn(&[u8]) -> String,
    decode: fn(&str) -> crate::Result<Vec<u8>>,
) -> i32 {
    let location = Location::parse(&args.input);
    let output = if args.decode {
        fetch::get_string(&location, &opts.fetch).and_then(|text| decode(text.trim()))
    } else {
        fetch::get_bytes(&location, &opts.fetch).map(|data| {
            let mut text = encode(&data).into_bytes();
            text.push(b'\n');
            text
        })
    };
    match output {
        Ok(bytes) => match write_stdout(&bytes) {
            Ok(()) => 0,
            Err(e) => fail("stdout", e),
        },
        Err(e) => fail(&args.input, e),
    }
}

// ---------------------------------------------------------------------------
// Compression commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    Deflate,
    Inflate,
    Zlib,
    Unzlib,
}

impl Transform {
    fn name(self) -> &'static str {
        match self {
            Self::Deflate => "deflate",
            Self::Inflate => "inflate",
            Self::Zlib => "zlib",
            Self::Unzlib => "unzlib",
        }
    }

    fn apply(self, location: &Location, output: &Path, fetch: &FetchOptions) -> crate::Result<u64> {
        let written = match self {
            Self::Deflate => {
                let data = fetch::get_bytes(location, fetch)?;
                file::set_deflate(output, &data)?;
                file::size(output).unwrap_or(0)
            }
            Self::Zlib => {
                let data = fetch::get_bytes(location, fetch)?;
                file::set_zlib(output, &data)?;
                file::size(output).unwrap_or(0)
            }
            Self::Inflate => {
                let data = file::get_deflate(location, fetch)?;
                file::set_bytes(output, &data)?;
                data.len() as u64
            }
            Self::Unzlib => {
                let data = file::get_zlib(location, fetch)?;
                file::set_bytes(output, &data)?;
                data.len() as u64
            }
        };
        Ok(written)
    }
}

fn cmd_transform(opts: &Options, args: &TransformArgs, transform: Transform) -> i32 {
    if let Err(msg) = check_output(opts, &args.output) {
        eprintln!("dryio: {msg}");
        return 1;
    }
    let location = Location::parse(&args.input);
    let written = match transform.apply(&location, &args.output, &opts.fetch) {
        Ok(n) => n,
        Err(e) => return fail(transform.name(), e),
    };
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "dryio: {}: wrote {written} bytes to {}",
            transform.name(),
            args.output.display()
        );
    }
    emit_stats(
        opts,
        serde_json::json!({
            "command": transform.name(),
            "input": args.input,
            "output": args.output.display().to_string(),
            "output_size": written,
        }),
    );
    0
}

// ---------------------------------------------------------------------------
// Config, listing and touch commands
// ---------------------------------------------------------------------------

fn cmd_config(opts: &Options, args: &LocationArgs) -> i32 {
    let parsed = match config::get(&Location::parse(&args.input), &opts.fetch) {
        Ok(c) => c,
        Err(e) => return fail(&args.input, e),
    };
    let text = match config::to_string(&parsed) {
        Ok(t) => t,
        Err(e) => return fail("config", e),
    };
    if let Err(e) = write_stdout(text.as_bytes()) {
        return fail("stdout", e);
    }
    emit_stats(
        opts,
        serde_json::json!({
            "command": "config",
            "input": args.input,
            "entries": parsed.len(),
        }),
    );
    0
}

fn cmd_ls(opts: &Options, args: &LsArgs) -> i32 {
    let listed = if args.files {
        dir::list_files(&args.dir)
    } else if args.dirs {
        dir::list_directories(&args.dir)
    } else {
        dir::list(&args.dir)
    };
    let mut names = match listed {
        Ok(n) => n,
        Err(e) => return fail(&args.dir.display().to_string(), e),
    };
    names.sort();
    let text = join_lines(names.iter().map(|n| n.as_bytes()));
    if let Err(e) = write_stdout(&text) {
        return fail("stdout", e);
    }
    emit_stats(
        opts,
        serde_json::json!({
            "command": "ls",
            "dir": args.dir.display().to_string(),
            "entries": names.len(),
        }),
    );
    0
}

fn cmd_touch(opts: &Options, args: &TouchArgs) -> i32 {
    let existed = file::exists(&args.path);
    if let Err(e) = file::touch(&args.path) {
        return fail(&args.path.display().to_string(), e);
    }
    if opts.verbose > 0 && !opts.quiet {
        let action = if existed { "updated" } else { "created" };
        eprintln!("dryio: touch: {action} {}", args.path.display());
    }
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn dispatch(opts: &Options, command: &Cmd) -> i32 {
    match command {
        Cmd::Head(args) => cmd_head(opts, args),
        Cmd::Tail(args) => cmd_tail(opts, args),
        Cmd::LastLine(args) => cmd_last_line(opts, args),
        Cmd::Md5(args) => cmd_md5(opts, args),
        Cmd::Crc64(args) => cmd_crc64(opts, args),
        Cmd::Base64(args) => run_codec(opts, args, codec::encode_base64, codec::try_decode_base64),
        Cmd::Hex(args) => run_codec(opts, args, codec::encode_hex, codec::try_decode_hex),
        Cmd::Deflate(args) => cmd_transform(opts, args, Transform::Deflate),
        Cmd::Inflate(args) => cmd_transform(opts, args, Transform::Inflate),
        Cmd::Zlib(args) => cmd_transform(opts, args, Transform::Zlib),
        Cmd::Unzlib(args) => cmd_transform(opts, args, Transform::Unzlib),
        Cmd::Config(args) => cmd_config(opts, args),
        Cmd::Ls(args) => cmd_ls(opts, args),
        Cmd::Touch(args) => cmd_touch(opts, args),
    }
}

/// Default log filter for the resolved verbosity. `RUST_LOG` still wins.
fn log_filter(opts: &Options) -> &'static str {
    match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(&cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();
    log::debug!("dispatching {:?}", cli.command);

    let exit_code = dispatch(&opts, &cli.command);
    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv: Vec<String> = std::iter::once("dryio".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        Cli::try_parse_from(argv).expect("cli parse failed")
    }

    #[test]
    fn parse_duration_suffixes() {
        assert_eq!(parse_duration("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("fast").is_err());
    }

    #[test]
    fn head_lines_default_and_explicit() {
        let cli = parse(&["head", "in.txt"]);
        match cli.command {
            Cmd::Head(args) => {
                assert_eq!(args.lines, DEFAULT_LINES);
                assert_eq!(args.input, "in.txt");
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = parse(&["tail", "-n", "3", "https://example.com/log"]);
        assert!(matches!(cli.command, Cmd::Tail(ref a) if a.lines == 3));
    }

    #[test]
    fn zero_lines_rejected() {
        let argv = ["dryio", "head", "-n", "0", "in.txt"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn global_flags_resolve() {
        let cli = parse(&["--json", "-vvv", "--timeout", "750ms", "md5", "x"]);
        let opts = resolve_options(&cli);
        assert!(opts.json_output);
        assert_eq!(opts.verbose, 2);
        assert_eq!(opts.fetch.header_timeout, Some(Duration::from_millis(750)));
    }

    #[test]
    fn verbosity_selects_log_filter() {
        assert_eq!(log_filter(&resolve_options(&parse(&["md5", "x"]))), "warn");
        assert_eq!(log_filter(&resolve_options(&parse(&["-v", "md5", "x"]))), "info");
        assert_eq!(log_filter(&resolve_options(&parse(&["-vv", "md5", "x"]))), "debug");
        assert_eq!(log_filter(&resolve_options(&parse(&["-vvvv", "md5", "x"]))), "debug");
        assert_eq!(log_filter(&resolve_options(&parse(&["-q", "md5", "x"]))), "error");
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["dryio", "-q", "-v", "md5", "x"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn ls_filters_conflict() {
        let cli = parse(&["ls", "--dirs", "/tmp"]);
        assert!(matches!(cli.command, Cmd::Ls(ref a) if a.dirs && !a.files));
        assert!(Cli::try_parse_from(["dryio", "ls", "--files", "--dirs"]).is_err());
    }

    #[test]
    fn codec_decode_flag() {
        let cli = parse(&["base64", "--decode", "in.b64"]);
        assert!(matches!(cli.command, Cmd::Base64(ref a) if a.decode));
        let cli = parse(&["hex", "in.bin"]);
        assert!(matches!(cli.command, Cmd::Hex(ref a) if !a.decode));
    }

    #[test]
    fn transform_refuses_existing_output_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.deflate");
        std::fs::write(&input, b"data").unwrap();
        std::fs::write(&output, b"existing").unwrap();

        let cli = parse(&[
            "deflate",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]);
        let opts = resolve_options(&cli);
        assert_eq!(dispatch(&opts, &cli.command), 1);
        assert_eq!(std::fs::read(&output).unwrap(), b"existing");

        let cli = parse(&[
            "--force",
            "deflate",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]);
        let opts = resolve_options(&cli);
        assert_eq!(dispatch(&opts, &cli.command), 0);
        assert_eq!(codec::inflate(&std::fs::read(&output).unwrap()), b"data");
    }
}
