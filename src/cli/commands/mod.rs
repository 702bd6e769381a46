//! CLI command implementations

pub mod expectations;
pub mod init_script;
pub mod run;
pub mod verify;

pub use expectations::execute as expectations;
pub use init_script::execute as init_script;
pub use run::execute as run;
pub use verify::execute as verify;

use crate::cli::PluginArgs;
use crate::config::Config;
use crate::error::RelocheckResult;
use crate::gradle::InitScript;
use crate::scenario::absolute_path;
use std::path::{Path, PathBuf};

/// Pick the command-line value when given, else the configured one
fn path_override(arg: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
    arg.or(configured).map(Path::to_path_buf)
}

/// Like `path_override`, anchored at the current directory
fn absolute_override(
    arg: Option<&Path>,
    configured: Option<&Path>,
) -> RelocheckResult<Option<PathBuf>> {
    path_override(arg, configured)
        .map(|path| absolute_path(&path))
        .transpose()
}

/// Build the init script settings from flags and config
fn build_init_script(plugin: &PluginArgs, config: &Config, cache_dir: PathBuf) -> InitScript {
    InitScript::new(
        cache_dir,
        plugin
            .kotlin_version
            .clone()
            .unwrap_or_else(|| config.plugin.kotlin_version.clone()),
    )
    .with_scan_url(plugin.scan_url.clone().or_else(|| config.scan.url.clone()))
    .with_plugin_mirror(
        plugin
            .plugin_mirror
            .clone()
            .or_else(|| config.plugin.mirror.clone()),
    )
}
