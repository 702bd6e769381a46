//! Expectation tables
//!
//! Maps each task path the relocated build must report to the outcome it
//! must report. Tables come from a TOML file or the built-in table for a
//! single-module Kotlin/JVM project:
//!
//! ```toml
//! [tasks]
//! ":compileKotlin" = "FROM_CACHE"
//! ":jar" = "SUCCESS"
//! ```

use crate::error::{RelocheckError, RelocheckResult};
use crate::outcome::TaskOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Built-in expectations for `assemble` on a single-module Kotlin/JVM project
const BUILTIN: &[(&str, TaskOutcome)] = &[
    (":compileKotlin", TaskOutcome::FromCache),
    (":compileJava", TaskOutcome::NoSource),
    (":processResources", TaskOutcome::NoSource),
    (":classes", TaskOutcome::UpToDate),
    (":inspectClassesForKotlinIC", TaskOutcome::Success),
    (":jar", TaskOutcome::Success),
    (":assemble", TaskOutcome::UpToDate),
];

/// On-disk format of an expectation file
#[derive(Debug, Default, Serialize, Deserialize)]
struct ExpectationFile {
    #[serde(default)]
    tasks: BTreeMap<String, TaskOutcome>,
}

/// Expected outcome per task path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationTable {
    entries: BTreeMap<String, TaskOutcome>,
}

impl ExpectationTable {
    /// Build a table from entries. An empty table is rejected.
    pub fn new(entries: BTreeMap<String, TaskOutcome>) -> RelocheckResult<Self> {
        if entries.is_empty() {
            return Err(RelocheckError::ExpectationsEmpty);
        }
        Ok(Self { entries })
    }

    /// The built-in table
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(path, outcome)| (path.to_string(), *outcome))
                .collect(),
        }
    }

    /// Load from a TOML file, or fall back to the built-in table
    pub async fn load(path: Option<&Path>) -> RelocheckResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path).await,
            None => {
                debug!("No expectation file given, using built-in table");
                Ok(Self::builtin())
            }
        }
    }

    /// Load from a TOML file
    pub async fn load_from_file(path: &Path) -> RelocheckResult<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            RelocheckError::io(format!("reading expectations from {}", path.display()), e)
        })?;

        let file: ExpectationFile =
            toml::from_str(&content).map_err(|e| RelocheckError::ExpectationsInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded {} expectations from {}",
            file.tasks.len(),
            path.display()
        );
        Self::new(file.tasks)
    }

    /// Expected outcome for a task path
    pub fn get(&self, path: &str) -> Option<TaskOutcome> {
        self.entries.get(path).copied()
    }

    /// Whether the table has an entry for this task path
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in task path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskOutcome)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Render in the expectation file format
    pub fn to_toml(&self) -> RelocheckResult<String> {
        let file = ExpectationFile {
            tasks: self.entries.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}

impl<'a> FromIterator<(&'a str, TaskOutcome)> for ExpectationTable {
    /// Collect without the emptiness check; use `new` for untrusted input.
    fn from_iter<I: IntoIterator<Item = (&'a str, TaskOutcome)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(path, outcome)| (path.to_string(), outcome))
                .collect(),
        }
    }
}
