//! Scenario progress with CI fallback

use super::context::UiContext;
use crate::scenario::Phase;
use indicatif::{ProgressBar, ProgressStyle};

/// Number of phases reported by a relocation scenario
const PHASES: u64 = 6;

/// Progress bar across the scenario phases.
///
/// Shows an indicatif bar in interactive mode, one plain line per phase in CI.
pub struct ScenarioProgress {
    bar: Option<ProgressBar>,
    step: std::cell::Cell<u64>,
}

impl ScenarioProgress {
    pub fn new(ctx: &UiContext) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(PHASES);
            let style = ProgressStyle::default_bar()
                .template("  {spinner:.cyan} {bar:20.cyan/dim} {pos}/{len} {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .progress_chars("━╸─");
            bar.set_style(style);
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };
        Self {
            bar,
            step: std::cell::Cell::new(0),
        }
    }

    /// Record that a phase has started
    pub fn on_phase(&self, phase: Phase) {
        let n = self.step.get() + 1;
        self.step.set(n);

        if let Some(ref bar) = self.bar {
            bar.set_position(n - 1);
            bar.set_message(phase.to_string());
        } else {
            println!("[{}/{}] {}...", n, PHASES, phase);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_non_interactive() {
        let ctx = UiContext::non_interactive();
        let progress = ScenarioProgress::new(&ctx);
        progress.on_phase(Phase::Prepare);
        progress.on_phase(Phase::CleanOriginal);
        progress.finish();
        assert_eq!(progress.step.get(), 2);
    }
}
