fn main() {
    #[cfg(feature = "cli")]
    dryio::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("dryio: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
