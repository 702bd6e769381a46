//! relocheck - Gradle build cache relocation check
//!
//! Builds one project from two checkout locations against a shared build
//! cache and verifies the relocated build's task outcomes against an
//! expectation table.

pub mod cli;
pub mod config;
pub mod error;
pub mod expectations;
pub mod gradle;
pub mod outcome;
pub mod report;
pub mod scenario;
pub mod ui;
pub mod verify;

pub use error::{RelocheckError, RelocheckResult};
pub use expectations::ExpectationTable;
pub use outcome::{BuildResult, TaskOutcome, TaskResult};
pub use verify::{verify, Verification};
