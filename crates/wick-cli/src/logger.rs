//! Logging infrastructure for the wick CLI.
//!
//! Structured logging on the `tracing` ecosystem. Verbosity comes from the
//! global CLI flags, with `RUST_LOG` as the escape hatch for custom
//! filters.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at startup, before any logging occurs.
///
/// The level is determined in this order:
/// 1. `--verbose` flag: DEBUG for wick crates
/// 2. `--quiet` flag: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for wick crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("wick_cli=debug,wick_serve=debug")
    } else if quiet {
        EnvFilter::new("wick_cli=error,wick_serve=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("wick_cli=info,wick_serve=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // tracing subscribers are global and can only be installed once per
    // process, so these only exercise filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _filter = EnvFilter::new("wick_cli=debug,wick_serve=debug");
    }

    #[test]
    fn quiet_filter_parses() {
        let _filter = EnvFilter::new("wick_cli=error,wick_serve=error");
    }
}
