// Error types for storecheck

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for storecheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when running the harness
#[derive(Debug, Error)]
pub enum Error {
    /// Fixture file could not be written or read back
    ///
    /// The suite has no valid inputs without the fixture, so this error
    /// aborts the whole run rather than a single case.
    #[error("Fixture '{}' is unusable: {source}", .path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file exists but its content is not a valid credential table
    #[error("Fixture '{}' is malformed: {reason}", .path.display())]
    FixtureFormat { path: PathBuf, reason: String },

    /// Browser session could not be acquired
    ///
    /// The requested engine is unavailable on the host or the launch
    /// failed. Fatal to the one test case that requested it; sibling
    /// cases continue.
    #[error("Failed to acquire '{engine}' session: {reason}")]
    SessionAcquisition { engine: String, reason: String },

    /// Timeout waiting for a UI condition
    ///
    /// A required state (for example the signup modal's visibility) was
    /// never reached within the bound. This is the primary signal of a
    /// real UI regression.
    #[error("Timed out after {timeout:?} waiting for {what}")]
    WaitTimeout { what: String, timeout: Duration },

    /// Element not found by the page driver
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Collaborator-surfaced driver failure
    #[error("Driver error: {0}")]
    Driver(String),

    /// Invalid harness configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
