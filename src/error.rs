//! Error types for relocheck
//!
//! All modules use `RelocheckResult<T>` as their return type.

use crate::outcome::TaskOutcome;
use crate::verify::Verification;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for relocheck operations
pub type RelocheckResult<T> = Result<T, RelocheckError>;

/// All errors that can occur in relocheck
#[derive(Error, Debug)]
pub enum RelocheckError {
    // Build tool errors
    #[error("Build tool not found: {0}")]
    ToolNotFound(PathBuf),

    #[error("Build failed in {dir}: {tasks} (exit code {code})\n{output}")]
    BuildFailed {
        dir: PathBuf,
        tasks: String,
        code: i32,
        output: String,
    },

    #[error("Failed to remove build state directory {path}: {source}")]
    StateDirRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized task line in build output: {0}")]
    OutputParse(String),

    #[error("Task {path} reported as both {first} and {second}")]
    ConflictingOutcomes {
        path: String,
        first: TaskOutcome,
        second: TaskOutcome,
    },

    // Checkout errors
    #[error("Checkout not configured: {0}")]
    CheckoutMissing(&'static str),

    #[error("Checkout is not a directory: {0}")]
    CheckoutNotDirectory(PathBuf),

    #[error("Original and relocated checkouts resolve to the same location: {0}")]
    CheckoutsIdentical(PathBuf),

    // Expectation errors
    #[error("Invalid expectation file {path}: {reason}")]
    ExpectationsInvalid { path: PathBuf, reason: String },

    #[error("Expectation table is empty")]
    ExpectationsEmpty,

    #[error("Unknown task outcome: {0}")]
    UnknownOutcome(String),

    // Verification errors
    #[error("Relocated build does not match expectations:\n{0}")]
    RelocationMismatch(Box<Verification>),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl RelocheckError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Whether this error means the scenario could not be carried out,
    /// as opposed to the relocated build disagreeing with expectations.
    pub fn is_infrastructure(&self) -> bool {
        !matches!(self, Self::RelocationMismatch(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolNotFound(_) => {
                Some("Set --gradle-home (RELOCHECK_GRADLE_HOME) or add a gradlew wrapper")
            }
            Self::CheckoutMissing(_) => {
                Some("Pass --original and --relocated, or set them under [checkouts]")
            }
            Self::CheckoutsIdentical(_) => {
                Some("Copy the project to a second location and point --relocated at it")
            }
            Self::ExpectationsEmpty => Some("Add at least one task under [tasks]"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RelocheckError::CheckoutMissing("original");
        assert!(err.to_string().contains("Checkout not configured: original"));
    }

    #[test]
    fn error_hint() {
        let err = RelocheckError::ExpectationsEmpty;
        assert_eq!(err.hint(), Some("Add at least one task under [tasks]"));
        assert_eq!(RelocheckError::ProcessSignaled.hint(), None);
    }

    #[test]
    fn error_classification() {
        let mismatch = RelocheckError::RelocationMismatch(Box::default());
        assert!(!mismatch.is_infrastructure());
        assert!(RelocheckError::ProcessSignaled.is_infrastructure());
    }
}
