//! Gradle integration
//!
//! Everything needed to drive Gradle from the outside:
//! - init script generation
//! - clean and build command lines
//! - child process execution and output streaming
//! - task outcome extraction from the plain console

pub mod init_script;
pub mod invocation;
mod native;
pub mod output;
mod tool;

pub use init_script::{InitScript, DEFAULT_KOTLIN_VERSION};
pub use invocation::{Invocation, InvocationKind};
pub use native::NativeGradle;
pub use tool::BuildTool;

use crate::error::{RelocheckError, RelocheckResult};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Max number of output lines to include in build error messages.
const BUILD_ERROR_TAIL_LINES: usize = 50;

/// Extract the useful tail of build output for error diagnostics.
pub(crate) fn build_error_output(lines: &[String]) -> String {
    let start = lines.len().saturating_sub(BUILD_ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Stream stdout+stderr from a child process, calling `on_output` for each line.
///
/// Lines are decoded lossily: Gradle relays compiler and test output
/// verbatim, and one stray byte must not hide the task headers after it.
/// Returns all collected output lines for error reporting and task parsing.
pub(crate) async fn stream_child_output(
    child: &mut tokio::process::Child,
    on_output: &(dyn Fn(String) + Send + Sync),
) -> RelocheckResult<Vec<String>> {
    let stderr = child.stderr.take().ok_or_else(|| {
        RelocheckError::io("capturing stderr", std::io::ErrorKind::BrokenPipe.into())
    })?;
    let stdout = child.stdout.take().ok_or_else(|| {
        RelocheckError::io("capturing stdout", std::io::ErrorKind::BrokenPipe.into())
    })?;

    let mut stderr_reader = BufReader::new(stderr).split(b'\n');
    let mut stdout_reader = BufReader::new(stdout).split(b'\n');

    let mut all_output = Vec::new();
    let mut stderr_done = false;
    let mut stdout_done = false;

    while !stderr_done || !stdout_done {
        tokio::select! {
            segment = stderr_reader.next_segment(), if !stderr_done => {
                match segment.map_err(|e| RelocheckError::io("reading build stderr", e))? {
                    Some(raw) => {
                        let line = decode_line(&raw);
                        on_output(line.clone());
                        all_output.push(line);
                    }
                    None => stderr_done = true,
                }
            }
            segment = stdout_reader.next_segment(), if !stdout_done => {
                match segment.map_err(|e| RelocheckError::io("reading build stdout", e))? {
                    Some(raw) => {
                        let line = decode_line(&raw);
                        on_output(line.clone());
                        all_output.push(line);
                    }
                    None => stdout_done = true,
                }
            }
        }
    }

    Ok(all_output)
}

/// Decode one raw output line, dropping a trailing carriage return
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
