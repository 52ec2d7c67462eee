//! Console sink for resolution failures.

use std::fmt::Write as _;

use schema_source::ErrorReporter;
use schema_source::report::LOCATOR_MARKER;

use crate::logging::{self, Colors};

/// Writes reported failures to stderr as a timestamped `ERROR` block.
///
/// Exiting is left to the caller (see `main`).
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    colors: Colors,
}

impl ConsoleReporter {
    /// Reporter colored only when stderr is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors: Colors::for_stderr(),
        }
    }

    /// Reporter with explicit colors.
    #[must_use]
    pub fn with_colors(colors: Colors) -> Self {
        Self { colors }
    }

    /// Render `message` as it will appear on stderr.
    ///
    /// The first line carries the timestamp; the locator line is highlighted
    /// and any following lines are indented under it.
    #[must_use]
    pub fn render(&self, message: &str, timestamp: &str) -> String {
        let c = &self.colors;
        let mut out = String::new();
        for (i, line) in message.lines().enumerate() {
            // Writing into a String cannot fail.
            let _ = if i == 0 {
                write!(out, "{timestamp} - ERROR - {}{line}{}", c.red, c.reset)
            } else if line.starts_with(LOCATOR_MARKER) {
                write!(out, "\n    {}{line}{}", c.blue, c.reset)
            } else {
                write!(out, "\n    {}{line}{}", c.dim, c.reset)
            };
        }
        out
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for ConsoleReporter {
    #[allow(clippy::print_stderr)]
    fn report(&self, message: &str) {
        eprintln!("{}", self.render(message, &logging::timestamp()));
    }
}
