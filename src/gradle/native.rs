//! Gradle executed as a child process
//!
//! Resolves the executable from an explicit installation, the checkout's
//! wrapper, or `PATH`, in that order.

use crate::error::{RelocheckError, RelocheckResult};
use crate::gradle::invocation::Invocation;
use crate::gradle::output::parse_tasks;
use crate::gradle::tool::BuildTool;
use crate::gradle::{build_error_output, stream_child_output};
use crate::outcome::BuildResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

#[cfg(windows)]
const GRADLE_BIN: &str = "gradle.bat";
#[cfg(not(windows))]
const GRADLE_BIN: &str = "gradle";

#[cfg(windows)]
const WRAPPER: &str = "gradlew.bat";
#[cfg(not(windows))]
const WRAPPER: &str = "gradlew";

/// Build tool backed by a local Gradle executable
pub struct NativeGradle {
    installation: Option<PathBuf>,
}

impl NativeGradle {
    /// Create a runner, optionally pinned to a Gradle installation directory
    pub fn new(installation: Option<PathBuf>) -> Self {
        Self { installation }
    }

    /// Resolve the executable to use for a checkout
    pub fn executable(&self, dir: &Path) -> RelocheckResult<PathBuf> {
        if let Some(ref home) = self.installation {
            let bin = home.join("bin").join(GRADLE_BIN);
            if !bin.is_file() {
                return Err(RelocheckError::ToolNotFound(bin));
            }
            return Ok(bin);
        }

        let wrapper = dir.join(WRAPPER);
        if wrapper.is_file() {
            return Ok(wrapper);
        }

        Ok(PathBuf::from(GRADLE_BIN))
    }
}

impl Default for NativeGradle {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl BuildTool for NativeGradle {
    async fn run(&self, invocation: &Invocation) -> RelocheckResult<BuildResult> {
        let exe = self.executable(&invocation.dir)?;
        let args = invocation.args();
        let command = format!("{} {}", exe.display(), args.join(" "));
        info!(
            "Running {} in {}",
            invocation.task_label(),
            invocation.dir.display()
        );
        debug!("Executing: {}", command);

        let mut child = Command::new(&exe)
            .args(&args)
            .current_dir(&invocation.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RelocheckError::ToolNotFound(exe.clone())
                } else {
                    RelocheckError::command_failed(command.clone(), e)
                }
            })?;

        let lines =
            stream_child_output(&mut child, &|line: String| debug!("gradle: {}", line)).await?;

        let status = child
            .wait()
            .await
            .map_err(|e| RelocheckError::command_failed(command.clone(), e))?;

        let code = status.code().ok_or(RelocheckError::ProcessSignaled)?;
        if code != 0 {
            return Err(RelocheckError::BuildFailed {
                dir: invocation.dir.clone(),
                tasks: invocation.task_label(),
                code,
                output: build_error_output(&lines),
            });
        }

        let tasks = parse_tasks(lines.iter().map(String::as_str))?;
        debug!("{} reported {} tasks", invocation.task_label(), tasks.len());

        Ok(BuildResult { tasks })
    }

    fn tool_name(&self) -> &'static str {
        "Gradle"
    }
}
