#![no_main]
use dryio::lines;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the line count; the rest is the buffer.
    let Some((&count, buf)) = data.split_first() else {
        return;
    };
    let n = usize::from(count).max(1);

    let (head, rest) = lines::head(buf, n);
    assert!(head.len() <= n);
    assert!(buf.ends_with(rest));

    let (tail, prefix) = lines::tail(buf, n);
    assert!(tail.len() <= n);
    assert!(buf.starts_with(prefix));
    for line in head.iter().chain(tail.iter()) {
        assert!(!line.contains(&b'\n'));
    }
});
