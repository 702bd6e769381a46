//! UI module for consistent CLI output
//!
//! Uses `cliclack` for step output and `indicatif` for scenario progress,
//! with automatic fallback to plain output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use relocheck::ui::{self, ScenarioProgress, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "Relocation check");
//!
//! let progress = ScenarioProgress::new(&ctx);
//! let report = scenario.run(|phase| progress.on_phase(phase)).await?;
//! progress.finish();
//!
//! ui::outro_success(&ctx, "Relocated build matches expectations");
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_error, outro_success, section, step_error, step_info, step_ok,
    verification,
};
pub use progress::ScenarioProgress;
