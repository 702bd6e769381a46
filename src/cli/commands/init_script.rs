//! Init-script command - print the generated Gradle init script

use crate::cli::InitScriptArgs;
use crate::config::Config;
use crate::error::RelocheckResult;
use std::path::PathBuf;

/// Placeholder shown when no cache directory is configured
const SCRATCH_CACHE: &str = "<scratch>/build-cache";

/// Execute the init-script command
pub async fn execute(args: InitScriptArgs, config: &Config) -> RelocheckResult<()> {
    let cache_dir =
        super::absolute_override(args.plugin.cache_dir.as_deref(), config.cache.dir.as_deref())?
            .unwrap_or_else(|| PathBuf::from(SCRATCH_CACHE));

    let script = super::build_init_script(&args.plugin, config, cache_dir);
    print!("{}", script.render());
    Ok(())
}
