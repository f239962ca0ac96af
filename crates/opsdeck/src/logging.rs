//! Logging setup for opsdeck.
//!
//! Diagnostics go to stderr through `tracing` so that report output on
//! stdout (including `--json`) stays machine-readable.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and above. Refused deletions and zero-burn scenarios show up here.
    #[default]
    Normal,
    /// Debug output: scenario computations and store mutations.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Map to the `tracing` level used as the default filter.
    #[must_use]
    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Derive verbosity from the `-v` count and `-q` flag.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
///
/// ```no_run
/// use opsdeck::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("opsdeck={}", verbosity.to_level());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time(),
    );

    // Already installed is fine.
    let _ = subscriber.try_init();
}

/// Quiet logging for tests: `RUST_LOG` if set, else `warn`.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(test_filter())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
fn test_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level(), Level::WARN);
        assert_eq!(Verbosity::Verbose.to_level(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level(), Level::TRACE);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_test_filter_falls_back_to_warn() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(test_filter().to_string(), "warn");
        }
    }

    #[test]
    fn test_from_flags_quiet_wins() {
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_from_flags_counts() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(9, false), Verbosity::Trace);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Trace);
    }

    #[test]
    fn test_init_test_logging_does_not_panic() {
        init_test_logging();
    }
}
