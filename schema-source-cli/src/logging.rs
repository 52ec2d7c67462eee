use std::io::IsTerminal;

use chrono::Local;
use tracing_subscriber::EnvFilter;

/// Timestamp format shared by log lines and reported failures.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

// ANSI color codes
#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub reset: &'static str,
    pub dim: &'static str,
    pub red: &'static str,
    pub blue: &'static str,
}

impl Colors {
    /// Colors when stderr is a terminal, plain text otherwise.
    #[must_use]
    pub fn for_stderr() -> Self {
        if std::io::stderr().is_terminal() {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    #[must_use]
    pub fn ansi() -> Self {
        Self {
            reset: "\x1b[0m",
            dim: "\x1b[2m",
            red: "\x1b[91m",  // headline
            blue: "\x1b[94m", // locator
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self {
            reset: "",
            dim: "",
            red: "",
            blue: "",
        }
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Filter directive for a `-v` count: warn, info, debug, trace.
#[must_use]
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag. Calling this more
/// than once is harmless; later calls keep the first subscriber.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
