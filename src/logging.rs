//! Diagnostics setup for the command-line tool.
//!
//! Events go to stderr so page output on stdout stays clean. `--verbose`
//! and `--quiet` take precedence over `RUST_LOG`; without either flag the
//! environment filter applies, falling back to `info`.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive forced by the verbosity flags, if any. `verbose` wins.
pub fn flag_directive(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some("girdoc=debug")
    } else if quiet {
        Some("girdoc=error")
    } else {
        None
    }
}

/// Install the global subscriber. Call once, before the first event. Colors
/// are only used on a terminal.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match flag_directive(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("girdoc=info")),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && std::io::stderr().is_terminal())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
