//! Task outcome extraction from Gradle's plain console output
//!
//! With `--console=plain` every task that runs prints a header line:
//!
//! ```text
//! > Task :compileKotlin FROM-CACHE
//! > Task :jar
//! ```

use crate::error::{RelocheckError, RelocheckResult};
use crate::outcome::{TaskOutcome, TaskResult};

const TASK_PREFIX: &str = "> Task ";

/// Parse one console line. Returns `None` for lines that are not task headers.
pub fn parse_task_line(line: &str) -> RelocheckResult<Option<TaskResult>> {
    let Some(rest) = line.trim_end().strip_prefix(TASK_PREFIX) else {
        return Ok(None);
    };

    let (path, suffix) = match rest.split_once(' ') {
        Some((path, suffix)) => (path, Some(suffix)),
        None => (rest, None),
    };

    if !path.starts_with(':') {
        return Err(RelocheckError::OutputParse(line.to_string()));
    }

    let outcome = TaskOutcome::from_console_suffix(suffix)
        .map_err(|_| RelocheckError::OutputParse(line.to_string()))?;

    Ok(Some(TaskResult {
        path: path.to_string(),
        outcome,
    }))
}

/// Parse every task header from a sequence of console lines.
///
/// Gradle prints a task's header again when its output resumes after
/// another task's, e.g. under `--parallel`. Repeats collapse into the first
/// occurrence; a repeat with a different outcome is an error.
pub fn parse_tasks<'a, I>(lines: I) -> RelocheckResult<Vec<TaskResult>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tasks: Vec<TaskResult> = Vec::new();
    for line in lines {
        let Some(task) = parse_task_line(line)? else {
            continue;
        };
        match tasks.iter().find(|t| t.path == task.path) {
            Some(seen) if seen.outcome != task.outcome => {
                return Err(RelocheckError::ConflictingOutcomes {
                    path: task.path,
                    first: seen.outcome,
                    second: task.outcome,
                });
            }
            Some(_) => {}
            None => tasks.push(task),
        }
    }
    Ok(tasks)
}
