//! Gradle command lines for clean and build passes

use std::path::{Path, PathBuf};

/// Whether an invocation populates/reads the cache or resets the checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    /// `clean` with build cache and scans disabled
    Clean,
    /// Target tasks with build cache and scans enabled
    Build,
}

/// A single Gradle run against one checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Project directory to run in
    pub dir: PathBuf,
    /// Clean or build pass
    pub kind: InvocationKind,
    /// Init scripts, generated one first
    pub init_scripts: Vec<PathBuf>,
    /// Extra arguments placed before task names
    pub extra_args: Vec<String>,
    /// Tasks to run for a build pass
    pub tasks: Vec<String>,
}

impl Invocation {
    /// Clean pass over `dir`
    pub fn clean(dir: &Path, init_scripts: &[PathBuf], extra_args: &[String]) -> Self {
        Self {
            dir: dir.to_path_buf(),
            kind: InvocationKind::Clean,
            init_scripts: init_scripts.to_vec(),
            extra_args: extra_args.to_vec(),
            tasks: vec!["clean".to_string()],
        }
    }

    /// Cached build of `tasks` in `dir`
    pub fn build(
        dir: &Path,
        init_scripts: &[PathBuf],
        extra_args: &[String],
        tasks: &[String],
    ) -> Self {
        Self {
            dir: dir.to_path_buf(),
            kind: InvocationKind::Build,
            init_scripts: init_scripts.to_vec(),
            extra_args: extra_args.to_vec(),
            tasks: tasks.to_vec(),
        }
    }

    /// Command-line arguments for the Gradle executable
    pub fn args(&self) -> Vec<String> {
        let mut args = match self.kind {
            InvocationKind::Clean => vec!["--no-build-cache".to_string(), "--no-scan".to_string()],
            InvocationKind::Build => vec!["--build-cache".to_string(), "--scan".to_string()],
        };

        for script in &self.init_scripts {
            args.push("--init-script".to_string());
            args.push(script.to_string_lossy().into_owned());
        }

        args.push("--stacktrace".to_string());
        args.push("--console=plain".to_string());
        args.extend(self.extra_args.iter().cloned());
        args.extend(self.tasks.iter().cloned());
        args
    }

    /// Task names joined for messages
    pub fn task_label(&self) -> String {
        self.tasks.join(" ")
    }
}
