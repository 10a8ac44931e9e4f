//! Logging setup using env_logger
//!
//! `RUST_LOG` is honoured unless verbosity flags are given on the
//! command line.

use log::LevelFilter;

/// Log level for the number of `-v` flags, `None` to defer to `RUST_LOG`
pub fn level_for(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Initialize logging to stderr
pub fn init(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(level) = level_for(verbose) {
        builder.filter_level(level);
    }

    builder.format_timestamp_secs().init();
}
