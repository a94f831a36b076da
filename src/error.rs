//! Error handling module
//!
//! This module provides unified error handling for the perf-tester library and
//! its driver.

use crate::config::ConfigError;
use crate::test_unit::TestError;
use std::fmt;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Lifecycle phase of a test unit in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The untimed `initialize` hook
    Initialize,
    /// The timed `run` operation
    Run,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initialize => f.write_str("initialize"),
            Phase::Run => f.write_str("run"),
        }
    }
}

/// Main error type for the library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was rejected before any test was timed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A test identifier does not name a registered test
    #[error("Unknown test: '{name}' is not registered as a performance test")]
    UnknownTest { name: String },
    /// A test unit returned an error; the whole batch is aborted
    #[error("Test '{description}' failed during {phase}: {source}")]
    TestFailed {
        description: String,
        phase: Phase,
        #[source]
        source: TestError,
    },
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid argument error with a custom message
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create an unknown test error for the given identifier
    pub fn unknown_test<T: Into<String>>(name: T) -> Self {
        Error::UnknownTest { name: name.into() }
    }

    /// Wrap a failure raised by a test unit
    pub fn test_failed<T: Into<String>>(description: T, phase: Phase, source: TestError) -> Self {
        Error::TestFailed {
            description: description.into(),
            phase,
            source,
        }
    }

    /// Returns true when the error was detected before any test was timed
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::UnknownTest { .. } | Error::Config(_)
        )
    }

    /// Map the context/message of this error using a transformation function
    ///
    /// Only message-carrying variants are changed; other variants are returned
    /// untouched.
    pub fn map_context<F>(self, f: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        match self {
            Error::InvalidArgument(msg) => Error::InvalidArgument(f(msg)),
            other => other,
        }
    }
}

/// Extensions for Result types used by the registry
pub trait ResultExt<T> {
    /// Add context to an error using a closure
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.map_context(|msg| format!("{}: {}", f(), msg)))
    }
}
