//! Failure message rendering and the reporter seam.

use std::fmt::{self, Write as _};
use std::sync::{Mutex, PoisonError};

/// First line of every resource failure message.
pub const FAILURE_HEADLINE: &str = "There was an error loading the requested resource";

/// Marker prefixed to the locator line.
pub const LOCATOR_MARKER: &str = ">>> ";

/// Render the failure message for `locator`.
///
/// The cause line is only present when `cause` is `Some`:
///
/// ```text
/// There was an error loading the requested resource
/// >>> https://example.com/data.json
/// error sending request for url (https://example.com/data.json)
/// ```
#[must_use]
pub fn failure_message(locator: &str, cause: Option<&dyn fmt::Display>) -> String {
    let mut message = format!("{FAILURE_HEADLINE}\n{LOCATOR_MARKER}{locator}");
    if let Some(cause) = cause {
        // Writing into a String cannot fail.
        let _ = write!(message, "\n{cause}");
    }
    message
}

/// Sink for rendered failure messages.
///
/// What happens after a report (log and continue, log and exit) belongs to
/// the implementor, not to the resolver.
pub trait ErrorReporter: Send + Sync {
    /// Receive one fully rendered failure message.
    fn report(&self, message: &str);
}

/// Reporter that keeps every message in memory.
///
/// Useful in tests and for callers that want to batch failures.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages reported so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of messages reported so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}
