//! Logging setup for the fob-split CLI.
//!
//! Logs go to stderr so that `schema` and `explain` output on stdout stays
//! machine-readable.
//!
//! # Verbosity
//!
//! 1. `--verbose`: DEBUG for the fob crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG` when set
//! 4. INFO for the fob crates otherwise

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "fob_graph=debug,fob_split=debug,fob_split_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "fob_graph=info,fob_split=info,fob_split_cli=info";

/// Build the filter for the given flags.
pub fn env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber. Call once, before logging.
///
/// ```rust,no_run
/// use fob_split_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// tracing::info!("splitting");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(env_filter(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        let filter = env_filter(true, false);
        assert!(filter.to_string().contains("fob_split=debug"));
    }

    #[test]
    fn test_quiet_filter_is_errors_only() {
        assert_eq!(env_filter(false, true).to_string(), "error");
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
