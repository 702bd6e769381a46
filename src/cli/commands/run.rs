//! Run command - build both checkouts and verify the relocated build

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::RelocheckResult;
use crate::expectations::ExpectationTable;
use crate::gradle::{BuildTool, NativeGradle};
use crate::report::RunReport;
use crate::scenario::{Checkouts, RelocationScenario, ScenarioSettings};
use crate::ui::{self, ScenarioProgress, UiContext};
use tracing::debug;

/// Execute the run command
pub async fn execute(args: RunArgs, config: &Config) -> RelocheckResult<()> {
    let ctx = UiContext::detect();

    let settings = resolve_settings(&args, config)?;
    let expectations_path = super::path_override(
        args.expectations.as_deref(),
        config.expectations.file.as_deref(),
    );
    let expectations = ExpectationTable::load(expectations_path.as_deref()).await?;
    let gradle = NativeGradle::new(super::path_override(
        args.gradle_home.as_deref(),
        config.gradle.installation.as_deref(),
    ));
    debug!("Resolved settings: {:?}", settings);

    ui::intro(&ctx, "Relocation check");
    ui::key_value(&ctx, "build tool", gradle.tool_name());
    ui::key_value(&ctx, "original", &settings.checkouts.original.display().to_string());
    ui::key_value(&ctx, "relocated", &settings.checkouts.relocated.display().to_string());
    ui::key_value(&ctx, "tasks", &settings.tasks.join(" "));
    ui::key_value(&ctx, "expected tasks", &expectations.len().to_string());

    let progress = ScenarioProgress::new(&ctx);
    let scenario = RelocationScenario::new(&gradle, settings, expectations);
    let result = scenario.run(|phase| progress.on_phase(phase)).await;
    progress.finish();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            ui::outro_error(&ctx, "Relocation check aborted");
            return Err(e);
        }
    };

    ui::section(&ctx, "Relocated build");
    ui::verification(&ctx, &report.verification);

    if let Some(ref path) = args.report {
        RunReport::new(Some(&report.checkouts), &report.verification)
            .write(path)
            .await?;
        ui::step_info(&ctx, &format!("Report written to {}", path.display()));
    }

    if report.passed() {
        ui::outro_success(&ctx, "Relocated build matches expectations");
    } else {
        ui::outro_error(&ctx, "Relocated build does not match expectations");
    }

    report.into_result().map(|_| ())
}

/// Merge flags, environment, and config file into scenario settings
fn resolve_settings(args: &RunArgs, config: &Config) -> RelocheckResult<ScenarioSettings> {
    let original = super::path_override(
        args.original.as_deref(),
        config.checkouts.original.as_deref(),
    );
    let relocated = super::path_override(
        args.relocated.as_deref(),
        config.checkouts.relocated.as_deref(),
    );
    let checkouts = Checkouts::resolve(original.as_deref(), relocated.as_deref())?;

    let tasks = if args.tasks.is_empty() {
        config.gradle.tasks.clone()
    } else {
        args.tasks.clone()
    };

    let mut extra_args = config.gradle.extra_args.clone();
    extra_args.extend(args.gradle_args.iter().cloned());

    Ok(ScenarioSettings {
        checkouts,
        kotlin_version: args
            .plugin
            .kotlin_version
            .clone()
            .unwrap_or_else(|| config.plugin.kotlin_version.clone()),
        scan_url: args.plugin.scan_url.clone().or_else(|| config.scan.url.clone()),
        plugin_mirror: args
            .plugin
            .plugin_mirror
            .clone()
            .or_else(|| config.plugin.mirror.clone()),
        supplementary_init_script: super::absolute_override(
            args.init_script.as_deref(),
            config.gradle.init_script.as_deref(),
        )?,
        cache_dir: super::absolute_override(
            args.plugin.cache_dir.as_deref(),
            config.cache.dir.as_deref(),
        )?,
        tasks,
        extra_args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PluginArgs;
    use crate::error::RelocheckError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn run_args() -> RunArgs {
        RunArgs {
            original: None,
            relocated: None,
            gradle_home: None,
            init_script: None,
            plugin: PluginArgs::default(),
            expectations: None,
            tasks: vec![],
            report: None,
            gradle_args: vec![],
        }
    }

    #[test]
    fn flags_override_config() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        let c = temp.path().join("c");
        for dir in [&a, &b, &c] {
            std::fs::create_dir(dir).unwrap();
        }

        let mut config = Config::default();
        config.checkouts.original = Some(a.clone());
        config.checkouts.relocated = Some(b.clone());
        config.plugin.kotlin_version = "1.3.50".to_string();
        config.gradle.extra_args = vec!["--offline".to_string()];

        let mut args = run_args();
        args.relocated = Some(c.clone());
        args.plugin.kotlin_version = Some("1.4.0".to_string());
        args.gradle_args = vec!["--info".to_string()];

        let settings = resolve_settings(&args, &config).unwrap();
        assert_eq!(settings.checkouts.original, a.canonicalize().unwrap());
        assert_eq!(settings.checkouts.relocated, c.canonicalize().unwrap());
        assert_eq!(settings.kotlin_version, "1.4.0");
        assert_eq!(settings.tasks, vec!["assemble"]);
        assert_eq!(settings.extra_args, vec!["--offline", "--info"]);
        assert_eq!(settings.cache_dir, None::<PathBuf>);
    }

    #[test]
    fn relative_shared_paths_become_absolute() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        for dir in [&a, &b] {
            std::fs::create_dir(dir).unwrap();
        }

        let mut config = Config::default();
        config.gradle.init_script = Some(PathBuf::from("extra.init.gradle"));

        let mut args = run_args();
        args.original = Some(a);
        args.relocated = Some(b);
        args.plugin.cache_dir = Some(PathBuf::from("build-cache"));

        let settings = resolve_settings(&args, &config).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(settings.cache_dir, Some(cwd.join("build-cache")));
        assert_eq!(
            settings.supplementary_init_script,
            Some(cwd.join("extra.init.gradle"))
        );
    }

    #[test]
    fn checkouts_are_mandatory() {
        let err = resolve_settings(&run_args(), &Config::default()).unwrap_err();
        assert!(matches!(err, RelocheckError::CheckoutMissing("original")));
    }
}
