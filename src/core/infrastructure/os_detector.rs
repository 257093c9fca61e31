//! Seam to the installation-media inspector.

use crate::core::domain::error::MachinesResult;
use async_trait::async_trait;

/// What inspecting an installation source found out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedOs {
    /// Short identifier of the detected OS.
    pub os: String,
    /// Identifier of the detected installation medium, if recognised.
    pub media: Option<String>,
}

/// Guesses the operating system of an installation source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OsDetector: Send + Sync {
    /// Returns `Ok(None)` when the source was readable but not recognised.
    async fn detect_os(&self, source: String) -> MachinesResult<Option<DetectedOs>>;
}
