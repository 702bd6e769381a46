//! Generated Gradle init script
//!
//! The script pins the Kotlin Gradle plugin version, points the local build
//! cache at the shared directory, and optionally wires a build-scan server
//! and a plugin repository mirror. Both builds of a scenario must receive
//! the same script so they share one cache directory.

use crate::error::{RelocheckError, RelocheckResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name of the generated script inside the scratch directory
pub const INIT_SCRIPT_NAME: &str = "relocheck.init.gradle";

/// Default Kotlin Gradle plugin version
pub const DEFAULT_KOTLIN_VERSION: &str = "1.3.72";

/// Maven coordinates of the Kotlin Gradle plugin, without the version
const KOTLIN_PLUGIN_MODULE: &str = "org.jetbrains.kotlin:kotlin-gradle-plugin";

/// Settings rendered into the init script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitScript {
    cache_dir: PathBuf,
    kotlin_version: String,
    scan_url: Option<String>,
    plugin_mirror: Option<String>,
}

impl InitScript {
    /// Create a script for the given cache directory and plugin version
    pub fn new(cache_dir: impl Into<PathBuf>, kotlin_version: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            kotlin_version: kotlin_version.into(),
            scan_url: None,
            plugin_mirror: None,
        }
    }

    /// Publish build scans to this server
    pub fn with_scan_url(mut self, url: Option<String>) -> Self {
        self.scan_url = url;
        self
    }

    /// Resolve plugins from this repository before the plugin portal
    pub fn with_plugin_mirror(mut self, url: Option<String>) -> Self {
        self.plugin_mirror = url;
        self
    }

    /// Shared build cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Render the Groovy source
    pub fn render(&self) -> String {
        let cache = groovy_string(&self.cache_dir.to_string_lossy());
        let mirror = self
            .plugin_mirror
            .as_deref()
            .map(|url| format!("maven {{ url {} }}", groovy_string(url)));

        let mut lines = Vec::new();

        lines.push("// Generated by relocheck. Do not edit.".to_string());
        lines.push(format!(
            "def relocheckKotlinVersion = {}",
            groovy_string(&self.kotlin_version)
        ));
        lines.push(String::new());

        // Plugin versions and the shared cache are settings-level concerns
        lines.push("settingsEvaluated { settings ->".to_string());
        lines.push("    settings.pluginManagement {".to_string());
        lines.push("        repositories {".to_string());
        if let Some(ref m) = mirror {
            lines.push(format!("            {}", m));
        }
        lines.push("            gradlePluginPortal()".to_string());
        lines.push("        }".to_string());
        lines.push("        resolutionStrategy {".to_string());
        lines.push("            eachPlugin {".to_string());
        lines.push(
            "                if (requested.id.id.startsWith('org.jetbrains.kotlin')) {".to_string(),
        );
        lines.push("                    useVersion(relocheckKotlinVersion)".to_string());
        lines.push("                }".to_string());
        lines.push("            }".to_string());
        lines.push("        }".to_string());
        lines.push("    }".to_string());
        lines.push("    settings.buildCache {".to_string());
        lines.push("        local {".to_string());
        lines.push("            enabled = true".to_string());
        lines.push("            push = true".to_string());
        lines.push(format!("            directory = new File({})", cache));
        lines.push("        }".to_string());
        lines.push("    }".to_string());
        lines.push("}".to_string());
        lines.push(String::new());

        // Legacy `buildscript` classpath resolution
        lines.push("allprojects {".to_string());
        lines.push("    buildscript {".to_string());
        if let Some(ref m) = mirror {
            lines.push(format!("        repositories {{ {} }}", m));
        }
        lines.push("        configurations.classpath {".to_string());
        lines.push("            resolutionStrategy {".to_string());
        lines.push(format!(
            "                force \"{}:${{relocheckKotlinVersion}}\"",
            KOTLIN_PLUGIN_MODULE
        ));
        lines.push("            }".to_string());
        lines.push("        }".to_string());
        lines.push("    }".to_string());
        lines.push("}".to_string());

        if let Some(ref url) = self.scan_url {
            lines.push(String::new());
            lines.push("rootProject {".to_string());
            lines.push("    pluginManager.withPlugin('com.gradle.build-scan') {".to_string());
            lines.push("        buildScan {".to_string());
            lines.push(format!("            server = {}", groovy_string(url)));
            lines.push("            publishAlways()".to_string());
            lines.push("        }".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
        }

        lines.push(String::new());
        lines.join("\n")
    }

    /// Write the script into `dir` and return its path
    pub async fn prepare(&self, dir: &Path) -> RelocheckResult<PathBuf> {
        fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
            RelocheckError::io(
                format!("creating cache directory {}", self.cache_dir.display()),
                e,
            )
        })?;

        let path = dir.join(INIT_SCRIPT_NAME);
        fs::write(&path, self.render()).await.map_err(|e| {
            RelocheckError::io(format!("writing init script {}", path.display()), e)
        })?;

        debug!("Wrote init script: {}", path.display());
        Ok(path)
    }
}

/// Quote a value as a single-quoted Groovy string literal
fn groovy_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn renders_version_and_cache() {
        let script = InitScript::new("/tmp/cache", "1.4.0").render();
        assert!(script.contains("def relocheckKotlinVersion = '1.4.0'"));
        assert!(script.contains("directory = new File('/tmp/cache')"));
        assert!(script.contains("kotlin-gradle-plugin:${relocheckKotlinVersion}"));
    }

    #[test]
    fn optional_sections_omitted_by_default() {
        let script = InitScript::new("/tmp/cache", "1.4.0").render();
        assert!(!script.contains("buildScan"));
        assert!(!script.contains("maven {"));
    }

    #[test]
    fn renders_scan_and_mirror() {
        let script = InitScript::new("/tmp/cache", "1.4.0")
            .with_scan_url(Some("https://scans.example.com".to_string()))
            .with_plugin_mirror(Some("https://mirror.example.com/plugins".to_string()))
            .render();
        assert!(script.contains("server = 'https://scans.example.com'"));
        assert!(script.contains("maven { url 'https://mirror.example.com/plugins' }"));
    }

    #[test]
    fn mirror_precedes_plugin_portal() {
        let script = InitScript::new("/tmp/cache", "1.4.0")
            .with_plugin_mirror(Some("https://mirror.example.com".to_string()))
            .render();
        let mirror = script.find("maven { url 'https://mirror.example.com' }").unwrap();
        let portal = script.find("gradlePluginPortal()").unwrap();
        assert!(mirror < portal);
        assert!(script.contains("repositories { maven { url 'https://mirror.example.com' } }"));
        assert!(script.ends_with("}\n"));
    }

    #[test]
    fn escapes_groovy_literals() {
        assert_eq!(groovy_string(r"C:\cache"), r"'C:\\cache'");
        assert_eq!(groovy_string("it's"), r"'it\'s'");
    }

    #[tokio::test]
    async fn prepare_writes_script_and_cache_dir() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");
        let script = InitScript::new(&cache, DEFAULT_KOTLIN_VERSION);

        let path = script.prepare(temp.path()).await.unwrap();
        assert!(cache.is_dir());
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, script.render());
    }
}
