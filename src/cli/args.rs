//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// relocheck - Gradle build cache relocation check
///
/// Builds the same project from two locations against one build cache and
/// verifies that the second build reuses the first one's outputs.
#[derive(Parser, Debug)]
#[command(name = "relocheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RELOCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, env = "RELOCHECK_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build both checkouts and verify the relocated build
    Run(RunArgs),

    /// Verify a saved plain-console build log without running Gradle
    Verify(VerifyArgs),

    /// Print the generated Gradle init script
    InitScript(InitScriptArgs),

    /// Print the active expectation table
    Expectations(ExpectationsArgs),
}

/// Arguments shared by commands that render the init script
#[derive(Parser, Debug, Default)]
pub struct PluginArgs {
    /// Kotlin Gradle plugin version to force
    #[arg(long, env = "RELOCHECK_KOTLIN_VERSION")]
    pub kotlin_version: Option<String>,

    /// Build scan server URL
    #[arg(long, env = "RELOCHECK_SCAN_URL")]
    pub scan_url: Option<String>,

    /// Plugin repository mirror URL
    #[arg(long, env = "RELOCHECK_PLUGIN_MIRROR")]
    pub plugin_mirror: Option<String>,

    /// Build cache directory shared by both builds
    #[arg(long, env = "RELOCHECK_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Checkout built first, to populate the cache
    #[arg(long, env = "RELOCHECK_ORIGINAL_DIR")]
    pub original: Option<PathBuf>,

    /// Checkout whose task outcomes are verified
    #[arg(long, env = "RELOCHECK_RELOCATED_DIR")]
    pub relocated: Option<PathBuf>,

    /// Gradle installation directory
    #[arg(long, env = "RELOCHECK_GRADLE_HOME")]
    pub gradle_home: Option<PathBuf>,

    /// Supplementary init script passed after the generated one
    #[arg(long, env = "RELOCHECK_INIT_SCRIPT")]
    pub init_script: Option<PathBuf>,

    #[command(flatten)]
    pub plugin: PluginArgs,

    /// Expectation file (TOML); built-in table when omitted
    #[arg(short, long, env = "RELOCHECK_EXPECTATIONS")]
    pub expectations: Option<PathBuf>,

    /// Tasks to build (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tasks: Vec<String>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Extra arguments passed to every Gradle invocation
    #[arg(last = true)]
    pub gradle_args: Vec<String>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Plain-console build log of the relocated build
    #[arg(short, long)]
    pub log: PathBuf,

    /// Expectation file (TOML); built-in table when omitted
    #[arg(short, long, env = "RELOCHECK_EXPECTATIONS")]
    pub expectations: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the init-script command
#[derive(Parser, Debug)]
pub struct InitScriptArgs {
    #[command(flatten)]
    pub plugin: PluginArgs,
}

/// Arguments for the expectations command
#[derive(Parser, Debug)]
pub struct ExpectationsArgs {
    /// Expectation file (TOML); built-in table when omitted
    #[arg(short, long, env = "RELOCHECK_EXPECTATIONS")]
    pub expectations: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// JSON lines
    Json,
}
