//! Output functions for consistent CLI formatting

use super::context::UiContext;
use crate::verify::Verification;
use console::style;

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).cyan().bold());
        println!();
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green().bold()).ok();
    } else {
        println!();
        println!("{} {}", style("[OK]").green(), message);
    }
}

/// Display error outro
pub fn outro_error(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).red().bold()).ok();
    } else {
        println!();
        println!("{} {}", style("[ERROR]").red(), message);
    }
}

/// Display a section header
pub fn section(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        println!();
        cliclack::log::info(style(title).bold()).ok();
    } else {
        println!();
        println!("{}", style(title).bold());
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        println!("  {} {}", style("[OK]").green(), message);
    }
}

/// Display an error step
pub fn step_error(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::error(message).ok();
    } else {
        println!("  {} {}", style("[FAIL]").red(), message);
    }
}

/// Display an info step
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        println!("  {} {}", style("[INFO]").cyan(), message);
    }
}

/// Print styled key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {}: {}", key, value);
    }
}

/// Print every discrepancy of a verification, one step per line
pub fn verification(ctx: &UiContext, v: &Verification) {
    if v.passed() {
        step_ok(ctx, &format!("{} tasks match expectations", v.matched));
        return;
    }

    for path in &v.missing {
        step_error(ctx, &format!("missing task {}", style(path).bold()));
    }
    for path in &v.surplus {
        step_error(ctx, &format!("unexpected task {}", style(path).bold()));
    }
    for path in &v.duplicates {
        step_error(ctx, &format!("task {} reported more than once", style(path).bold()));
    }
    for m in &v.mismatches {
        step_error(
            ctx,
            &format!(
                "{}: expected {}, got {}",
                style(&m.path).bold(),
                style(m.expected).green(),
                style(m.actual).red()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::TaskOutcome;
    use crate::verify::OutcomeMismatch;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        // These should not panic
        intro(&ctx, "Test");
        section(&ctx, "Checkouts");
        key_value(&ctx, "original", "/work/a");
        step_ok(&ctx, "Step completed");
        step_error(&ctx, "Error");
        outro_success(&ctx, "Done");
    }

    #[test]
    fn verification_non_interactive() {
        let ctx = UiContext::non_interactive();
        let v = Verification {
            missing: vec![":jar".to_string()],
            mismatches: vec![OutcomeMismatch {
                path: ":compileKotlin".to_string(),
                expected: TaskOutcome::FromCache,
                actual: TaskOutcome::Success,
            }],
            ..Default::default()
        };
        verification(&ctx, &v);
        verification(&ctx, &Verification::default());
    }
}
