use std::collections::BTreeMap;
use std::io::Read;

use dryio::{FetchOptions, Location, Source, checksum, config, dir, fetch, file, lines};
use tempfile::tempdir;

#[test]
fn log_file_workflow() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("app.log");

    for i in 0..5 {
        file::append_fmt(&log, format_args!("entry {i}\r\n")).unwrap();
    }
    file::append_string(&log, "partial").unwrap();

    let loc = Location::from(log.as_path());
    let opts = FetchOptions::default();
    let data = fetch::get_bytes(&loc, &opts).unwrap();

    let (first, rest) = lines::head(&data, 2);
    assert_eq!(first, [&b"entry 0"[..], b"entry 1"]);
    assert!(rest.starts_with(b"entry 2"));

    let (last, _) = lines::tail(&data, 2);
    assert_eq!(last, [&b"partial"[..], b"entry 4"]);

    assert_eq!(fetch::last_line(&loc, &opts).unwrap(), "partial");
    assert_eq!(
        fetch::tail_lines(&loc, 3, &opts).unwrap(),
        ["partial", "entry 4", "entry 3"]
    );
}

#[test]
fn last_line_scans_only_trailing_window_of_large_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("large.txt");
    let mut content = Vec::new();
    for i in 0..20_000 {
        content.extend_from_slice(format!("line number {i}\n").as_bytes());
    }
    content.extend_from_slice(b"the end");
    file::set_bytes(&path, &content).unwrap();
    assert!(file::size(&path).unwrap() > fetch::LAST_LINE_WINDOW);

    let loc = Location::parse(&format!("file://{}", path.display()));
    assert_eq!(
        fetch::last_line(&loc, &FetchOptions::default()).unwrap(),
        "the end"
    );
}

#[test]
fn config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    let mut settings = BTreeMap::new();
    settings.insert("name".to_string(), "dryio".to_string());
    settings.insert("greeting".to_string(), "  hello  ".to_string());
    config::set(&path, &settings).unwrap();

    file::append_string(&path, "# trailing comment\nnot a pair\n").unwrap();
    let loaded = config::get(&Location::from(path.as_path()), &FetchOptions::default()).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn checksums_over_written_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    let blob: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    file::set_bytes(&path, &blob).unwrap();

    let loc = Location::from(path.as_path());
    let opts = FetchOptions::default();
    assert_eq!(checksum::file_md5(&loc, &opts).unwrap(), checksum::md5(&blob));
    assert_eq!(checksum::file_crc64(&loc, &opts).unwrap(), checksum::crc64(&blob));
}

#[test]
fn directory_listing_after_writes() {
    let root = tempdir().unwrap();
    file::set_string(&root.path().join("a.json"), "{}").unwrap();
    file::touch(&root.path().join("b.txt")).unwrap();
    std::fs::create_dir(root.path().join("nested")).unwrap();

    let mut files = dir::list_files(root.path()).unwrap();
    files.sort();
    assert_eq!(files, ["a.json", "b.txt"]);
    assert_eq!(dir::list_directories(root.path()).unwrap(), ["nested"]);
    assert_eq!(
        file::find(&[root.path().join("nested"), root.path().to_path_buf()], "b.txt"),
        Some(root.path().join("b.txt"))
    );
}

#[test]
fn source_reader_feeds_file_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("copy.txt");
    let mut reader = Source::text(format_args!("{}-{}", "copied", 1)).into_reader();
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).unwrap();
    file::set_bytes(&path, &buf).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "copied-1");
}
