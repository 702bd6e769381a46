//! Build tool abstraction
//!
//! The scenario talks to the build tool through this trait so it can be
//! driven by a real Gradle installation or by a scripted fake in tests.

use crate::error::RelocheckResult;
use crate::gradle::invocation::Invocation;
use crate::outcome::BuildResult;
use async_trait::async_trait;

/// Abstract build tool interface
#[async_trait]
pub trait BuildTool: Send + Sync {
    /// Run one invocation to completion.
    ///
    /// A build that runs but fails is reported as an error, not as a
    /// `BuildResult` with `success == false`.
    async fn run(&self, invocation: &Invocation) -> RelocheckResult<BuildResult>;

    /// Get the human-readable tool name for display
    fn tool_name(&self) -> &'static str;
}
