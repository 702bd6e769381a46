//! Verify command - check a saved build log against the expectation table

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::{RelocheckError, RelocheckResult};
use crate::expectations::ExpectationTable;
use crate::gradle::output::parse_tasks;
use crate::outcome::BuildResult;
use crate::report::RunReport;
use crate::ui::{self, UiContext};
use crate::verify::verify;
use tokio::fs;

/// Execute the verify command
pub async fn execute(args: VerifyArgs, config: &Config) -> RelocheckResult<()> {
    let ctx = UiContext::detect();

    let log = fs::read_to_string(&args.log).await.map_err(|e| {
        RelocheckError::io(format!("reading build log {}", args.log.display()), e)
    })?;
    let result = BuildResult {
        tasks: parse_tasks(log.lines())?,
    };

    let path = super::path_override(
        args.expectations.as_deref(),
        config.expectations.file.as_deref(),
    );
    let expectations = ExpectationTable::load(path.as_deref()).await?;

    let verification = verify(&result, &expectations);
    ui::section(&ctx, &format!("Build log {}", args.log.display()));
    ui::verification(&ctx, &verification);

    if let Some(ref report) = args.report {
        RunReport::new(None, &verification).write(report).await?;
    }

    if verification.passed() {
        Ok(())
    } else {
        Err(RelocheckError::RelocationMismatch(Box::new(verification)))
    }
}
