//! Comparison of a build result against an expectation table
//!
//! The task path sets must be equal before outcomes are compared at all.
//! Outcome mismatches are collected rather than stopping at the first one,
//! so a single report lists every discrepancy.

use crate::expectations::ExpectationTable;
use crate::outcome::{BuildResult, TaskOutcome};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A task whose reported outcome differs from the expected one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeMismatch {
    pub path: String,
    pub expected: TaskOutcome,
    pub actual: TaskOutcome,
}

/// Diagnostics from comparing one build result against a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Expected tasks the build did not report
    pub missing: Vec<String>,
    /// Reported tasks the table does not mention
    pub surplus: Vec<String>,
    /// Tasks the build reported more than once
    pub duplicates: Vec<String>,
    /// Matched tasks with the wrong outcome
    pub mismatches: Vec<OutcomeMismatch>,
    /// Number of expected tasks the build reported
    pub matched: usize,
}

impl Verification {
    /// Whether the task path sets were exactly equal
    pub fn task_sets_equal(&self) -> bool {
        self.missing.is_empty() && self.surplus.is_empty() && self.duplicates.is_empty()
    }

    /// Pass only with equal task sets and no outcome mismatch
    pub fn passed(&self) -> bool {
        self.task_sets_equal() && self.mismatches.is_empty()
    }
}

/// Compare a build result against the expectation table
pub fn verify(result: &BuildResult, table: &ExpectationTable) -> Verification {
    let matched = table.iter().filter(|(path, _)| result.contains(path)).count();
    let duplicates = duplicates(result);

    if !duplicates.is_empty() || matched != table.len() || matched != result.tasks.len() {
        return Verification {
            missing: table
                .iter()
                .filter(|(path, _)| !result.contains(path))
                .map(|(path, _)| path.to_string())
                .collect(),
            surplus: result
                .tasks
                .iter()
                .filter(|t| !table.contains(&t.path))
                .map(|t| t.path.clone())
                .collect(),
            duplicates,
            mismatches: Vec::new(),
            matched,
        };
    }

    let mismatches = result
        .tasks
        .iter()
        .filter_map(|task| {
            let expected = table.get(&task.path)?;
            (expected != task.outcome).then(|| OutcomeMismatch {
                path: task.path.clone(),
                expected,
                actual: task.outcome,
            })
        })
        .collect();

    Verification {
        mismatches,
        matched,
        ..Default::default()
    }
}

fn duplicates(result: &BuildResult) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for task in &result.tasks {
        if !seen.insert(task.path.as_str()) {
            dups.insert(task.path.clone());
        }
    }
    dups.into_iter().collect()
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "All {} tasks match expectations", self.matched);
        }

        for path in &self.missing {
            writeln!(f, "  missing task: {}", path)?;
        }
        for path in &self.surplus {
            writeln!(f, "  unexpected task: {}", path)?;
        }
        for path in &self.duplicates {
            writeln!(f, "  task reported more than once: {}", path)?;
        }
        for m in &self.mismatches {
            writeln!(f, "  {}: expected {}, got {}", m.path, m.expected, m.actual)?;
        }
        Ok(())
    }
}
