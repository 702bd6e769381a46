//! The relocation scenario
//!
//! Two checkouts of the same project are cleaned, then built one after the
//! other against a single build cache directory. The original build only
//! populates the cache. The relocated build's task outcomes are compared
//! with the expectation table.
//!
//! Steps run strictly in order and are never retried:
//! clean original, clean relocated, build original, build relocated, verify.

use crate::error::{RelocheckError, RelocheckResult};
use crate::expectations::ExpectationTable;
use crate::gradle::{BuildTool, InitScript, Invocation};
use crate::outcome::BuildResult;
use crate::verify::{verify, Verification};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Gradle's per-project state directory, removed after each clean
pub const STATE_DIR: &str = ".gradle";

/// The two checkouts being compared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkouts {
    pub original: PathBuf,
    pub relocated: PathBuf,
}

impl Checkouts {
    /// Resolve both checkouts and make sure they are distinct directories
    pub fn resolve(original: Option<&Path>, relocated: Option<&Path>) -> RelocheckResult<Self> {
        let original =
            canonical_dir(original.ok_or(RelocheckError::CheckoutMissing("original"))?)?;
        let relocated =
            canonical_dir(relocated.ok_or(RelocheckError::CheckoutMissing("relocated"))?)?;

        if original == relocated {
            return Err(RelocheckError::CheckoutsIdentical(original));
        }

        Ok(Self {
            original,
            relocated,
        })
    }
}

/// Anchor a path at the current directory.
///
/// Gradle runs inside each checkout, so any path shared by both builds
/// must not be relative.
pub fn absolute_path(path: &Path) -> RelocheckResult<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| RelocheckError::io(format!("resolving path {}", path.display()), e))
}

fn canonical_dir(path: &Path) -> RelocheckResult<PathBuf> {
    let canonical = path.canonicalize().map_err(|e| {
        RelocheckError::io(format!("resolving checkout path {}", path.display()), e)
    })?;
    if !canonical.is_dir() {
        return Err(RelocheckError::CheckoutNotDirectory(canonical));
    }
    Ok(canonical)
}

/// Everything the scenario needs besides the build tool and expectations
#[derive(Debug, Clone)]
pub struct ScenarioSettings {
    pub checkouts: Checkouts,
    pub kotlin_version: String,
    pub scan_url: Option<String>,
    pub plugin_mirror: Option<String>,
    /// User init script passed after the generated one
    pub supplementary_init_script: Option<PathBuf>,
    /// Shared cache directory; a scratch directory is used when unset
    pub cache_dir: Option<PathBuf>,
    pub tasks: Vec<String>,
    pub extra_args: Vec<String>,
}

/// Scenario steps, reported as they start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prepare,
    CleanOriginal,
    CleanRelocated,
    BuildOriginal,
    BuildRelocated,
    Verify,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Prepare => "Preparing init script",
            Self::CleanOriginal => "Cleaning original checkout",
            Self::CleanRelocated => "Cleaning relocated checkout",
            Self::BuildOriginal => "Building original checkout",
            Self::BuildRelocated => "Building relocated checkout",
            Self::Verify => "Verifying task outcomes",
        };
        f.write_str(label)
    }
}

/// Result of a completed scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub checkouts: Checkouts,
    pub relocated: BuildResult,
    pub verification: Verification,
}

impl ScenarioReport {
    /// Whether the relocated build matched expectations
    pub fn passed(&self) -> bool {
        self.verification.passed()
    }

    /// Turn a failed verification into an error
    pub fn into_result(self) -> RelocheckResult<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(RelocheckError::RelocationMismatch(Box::new(self.verification)))
        }
    }
}

/// Drives a build tool through the relocation scenario
pub struct RelocationScenario<'a> {
    tool: &'a dyn BuildTool,
    settings: ScenarioSettings,
    expectations: ExpectationTable,
}

impl<'a> RelocationScenario<'a> {
    pub fn new(
        tool: &'a dyn BuildTool,
        settings: ScenarioSettings,
        expectations: ExpectationTable,
    ) -> Self {
        Self {
            tool,
            settings,
            expectations,
        }
    }

    /// Run every step, calling `on_phase` as each one starts.
    ///
    /// Errors from preparation, cleaning, or either build abort the scenario.
    /// A completed relocated build always yields a report, pass or fail.
    pub async fn run<F>(&self, mut on_phase: F) -> RelocheckResult<ScenarioReport>
    where
        F: FnMut(Phase),
    {
        let scratch = tempfile::Builder::new()
            .prefix("relocheck-")
            .tempdir()
            .map_err(|e| RelocheckError::io("creating scratch directory", e))?;

        on_phase(Phase::Prepare);
        let cache_dir = match self.settings.cache_dir {
            Some(ref dir) => absolute_path(dir)?,
            None => scratch.path().join("build-cache"),
        };
        let script = InitScript::new(&cache_dir, self.settings.kotlin_version.clone())
            .with_scan_url(self.settings.scan_url.clone())
            .with_plugin_mirror(self.settings.plugin_mirror.clone());
        let mut init_scripts = vec![script.prepare(scratch.path()).await?];
        if let Some(ref extra) = self.settings.supplementary_init_script {
            init_scripts.push(absolute_path(extra)?);
        }
        info!("Using build cache at {}", cache_dir.display());

        let checkouts = &self.settings.checkouts;

        on_phase(Phase::CleanOriginal);
        self.clean_checkout(&checkouts.original, &init_scripts).await?;

        on_phase(Phase::CleanRelocated);
        self.clean_checkout(&checkouts.relocated, &init_scripts).await?;

        on_phase(Phase::BuildOriginal);
        self.build(&checkouts.original, &init_scripts).await?;

        on_phase(Phase::BuildRelocated);
        let relocated = self.build(&checkouts.relocated, &init_scripts).await?;

        on_phase(Phase::Verify);
        let verification = verify(&relocated, &self.expectations);
        info!(
            "Verification {}: {} matched, {} missing, {} unexpected, {} mismatched",
            if verification.passed() { "passed" } else { "failed" },
            verification.matched,
            verification.missing.len(),
            verification.surplus.len(),
            verification.mismatches.len()
        );

        Ok(ScenarioReport {
            checkouts: checkouts.clone(),
            relocated,
            verification,
        })
    }

    /// Run `clean` without cache or scan, then drop the local state directory
    async fn clean_checkout(&self, dir: &Path, init_scripts: &[PathBuf]) -> RelocheckResult<()> {
        let invocation = Invocation::clean(dir, init_scripts, &self.settings.extra_args);
        self.tool.run(&invocation).await?;
        remove_state_dir(dir).await
    }

    async fn build(&self, dir: &Path, init_scripts: &[PathBuf]) -> RelocheckResult<BuildResult> {
        let invocation = Invocation::build(
            dir,
            init_scripts,
            &self.settings.extra_args,
            &self.settings.tasks,
        );
        self.tool.run(&invocation).await
    }
}

async fn remove_state_dir(dir: &Path) -> RelocheckResult<()> {
    let state = dir.join(STATE_DIR);
    match fs::remove_dir_all(&state).await {
        Ok(()) => {
            debug!("Removed {}", state.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RelocheckError::StateDirRemove {
            path: state,
            source: e,
        }),
    }
}
