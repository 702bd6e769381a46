//! Configuration schema for relocheck
//!
//! Configuration is stored at `~/.config/relocheck/config.toml`. Every key
//! can be overridden by a command-line flag or environment variable.

use crate::gradle::DEFAULT_KOTLIN_VERSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gradle invocation settings
    pub gradle: GradleConfig,

    /// Kotlin plugin resolution
    pub plugin: PluginConfig,

    /// Build scan publishing
    pub scan: ScanConfig,

    /// Checkouts to compare
    pub checkouts: CheckoutsConfig,

    /// Shared build cache
    pub cache: CacheConfig,

    /// Expectation table source
    pub expectations: ExpectationsConfig,
}

/// Gradle invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradleConfig {
    /// Gradle installation directory (uses wrapper or PATH when unset)
    pub installation: Option<PathBuf>,

    /// Supplementary init script passed after the generated one
    pub init_script: Option<PathBuf>,

    /// Tasks to build in both checkouts
    pub tasks: Vec<String>,

    /// Extra arguments for every invocation
    pub extra_args: Vec<String>,
}

impl Default for GradleConfig {
    fn default() -> Self {
        Self {
            installation: None,
            init_script: None,
            tasks: vec!["assemble".to_string()],
            extra_args: vec![],
        }
    }
}

/// Kotlin plugin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Kotlin Gradle plugin version forced on both builds
    pub kotlin_version: String,

    /// Plugin repository mirror
    pub mirror: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            kotlin_version: DEFAULT_KOTLIN_VERSION.to_string(),
            mirror: None,
        }
    }
}

/// Build scan settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Build scan server URL
    pub url: Option<String>,
}

/// Checkout locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutsConfig {
    /// Checkout built first, to populate the cache
    pub original: Option<PathBuf>,

    /// Checkout whose outcomes are verified
    pub relocated: Option<PathBuf>,
}

/// Build cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory shared by both builds (scratch dir when unset)
    pub dir: Option<PathBuf>,
}

/// Expectation table settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectationsConfig {
    /// TOML expectation file (built-in table when unset)
    pub file: Option<PathBuf>,
}
