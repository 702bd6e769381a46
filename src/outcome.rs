//! Task outcomes and build results
//!
//! Gradle reports how each task was resolved in a run. The plain console
//! prints the outcome as a suffix on the task line (`FROM-CACHE`), while
//! expectation files use the underscore form (`FROM_CACHE`). Both parse.

use crate::error::{RelocheckError, RelocheckResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a task was resolved in one build run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskOutcome {
    /// Freshly executed
    Success,
    /// Outputs fetched from the build cache
    FromCache,
    /// Unchanged since the last run
    UpToDate,
    /// Not executed
    Skipped,
    /// Had no applicable input
    NoSource,
}

impl TaskOutcome {
    /// Canonical name as used in expectation files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::FromCache => "FROM_CACHE",
            Self::UpToDate => "UP_TO_DATE",
            Self::Skipped => "SKIPPED",
            Self::NoSource => "NO_SOURCE",
        }
    }

    /// Parse the suffix Gradle prints after a task path, if any.
    ///
    /// A task line without a suffix was executed, so `None` maps to
    /// `Success`.
    pub fn from_console_suffix(suffix: Option<&str>) -> RelocheckResult<Self> {
        match suffix.map(str::trim) {
            None | Some("") => Ok(Self::Success),
            Some(s) => s.parse(),
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskOutcome {
    type Err = RelocheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(Self::Success),
            "FROM_CACHE" => Ok(Self::FromCache),
            "UP_TO_DATE" => Ok(Self::UpToDate),
            "SKIPPED" => Ok(Self::Skipped),
            "NO_SOURCE" => Ok(Self::NoSource),
            _ => Err(RelocheckError::UnknownOutcome(s.to_string())),
        }
    }
}

/// One task as reported by a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Hierarchical task path, e.g. `:lib:compileKotlin`
    pub path: String,
    /// How the task was resolved
    pub outcome: TaskOutcome,
}

/// Task outcomes of a single successful build invocation.
///
/// A failed build never produces one; it surfaces as `BuildFailed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    /// Tasks in the order the build reported them
    pub tasks: Vec<TaskResult>,
}

impl BuildResult {
    /// Look up the outcome of a task by path
    pub fn outcome_of(&self, path: &str) -> Option<TaskOutcome> {
        self.tasks
            .iter()
            .find(|t| t.path == path)
            .map(|t| t.outcome)
    }

    /// Whether a task with this path was reported
    pub fn contains(&self, path: &str) -> bool {
        self.tasks.iter().any(|t| t.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("FROM_CACHE".parse::<TaskOutcome>().unwrap(), TaskOutcome::FromCache);
        assert_eq!("NO_SOURCE".parse::<TaskOutcome>().unwrap(), TaskOutcome::NoSource);
    }

    #[test]
    fn parses_console_names() {
        assert_eq!("UP-TO-DATE".parse::<TaskOutcome>().unwrap(), TaskOutcome::UpToDate);
        assert_eq!("FROM-CACHE".parse::<TaskOutcome>().unwrap(), TaskOutcome::FromCache);
    }

    #[test]
    fn missing_suffix_is_success() {
        assert_eq!(
            TaskOutcome::from_console_suffix(None).unwrap(),
            TaskOutcome::Success
        );
        assert_eq!(
            TaskOutcome::from_console_suffix(Some(" SKIPPED")).unwrap(),
            TaskOutcome::Skipped
        );
    }

    #[test]
    fn rejects_unknown() {
        let err = "FAILED".parse::<TaskOutcome>().unwrap_err();
        assert!(matches!(err, RelocheckError::UnknownOutcome(s) if s == "FAILED"));
    }

    #[test]
    fn display_matches_serde() {
        let json = serde_json::to_string(&TaskOutcome::UpToDate).unwrap();
        assert_eq!(json, format!("\"{}\"", TaskOutcome::UpToDate));
    }

    #[test]
    fn build_result_lookup() {
        let result = BuildResult {
            tasks: vec![TaskResult {
                path: ":jar".to_string(),
                outcome: TaskOutcome::Success,
            }],
        };
        assert_eq!(result.outcome_of(":jar"), Some(TaskOutcome::Success));
        assert!(!result.contains(":classes"));
    }
}
