//! JSON run reports
//!
//! Written on request so CI can archive the outcome of a relocation check
//! next to the build scans.

use crate::error::{RelocheckError, RelocheckResult};
use crate::scenario::Checkouts;
use crate::verify::Verification;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Serialized form of one verification run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkouts: Option<&'a Checkouts>,
    pub passed: bool,
    pub verification: &'a Verification,
}

impl<'a> RunReport<'a> {
    pub fn new(checkouts: Option<&'a Checkouts>, verification: &'a Verification) -> Self {
        Self {
            timestamp: Utc::now(),
            checkouts,
            passed: verification.passed(),
            verification,
        }
    }

    /// Write the report as pretty-printed JSON
    pub async fn write(&self, path: &Path) -> RelocheckResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                RelocheckError::io(format!("creating report directory {}", parent.display()), e)
            })?;
        }

        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json)
            .await
            .map_err(|e| RelocheckError::io(format!("writing report {}", path.display()), e))?;

        info!("Report written to {}", path.display());
        Ok(())
    }
}
