//! Expectations command - print the active expectation table

use crate::cli::ExpectationsArgs;
use crate::config::Config;
use crate::error::RelocheckResult;
use crate::expectations::ExpectationTable;

/// Execute the expectations command
pub async fn execute(args: ExpectationsArgs, config: &Config) -> RelocheckResult<()> {
    let path = super::path_override(
        args.expectations.as_deref(),
        config.expectations.file.as_deref(),
    );
    let table = ExpectationTable::load(path.as_deref()).await?;
    print!("{}", table.to_toml()?);
    Ok(())
}
