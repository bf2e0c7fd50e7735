fn main() {
    #[cfg(feature = "cli")]
    ips_patcher::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("ips-patcher: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
