#![no_main]
use dryio::config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let parsed = config::parse(&text);

    // Anything the parser produced must serialize and parse back unchanged.
    if let Ok(serialized) = config::to_string(&parsed) {
        assert_eq!(config::parse(&serialized), parsed);
    }
});
