use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Scheme prefixes accepted for a remote installation tree or image.
pub const ACCEPTED_URL_PREFIXES: [&str; 3] = ["http", "ftp", "nfs"];

/// Where the installer (or the disk to import) comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SourceType {
    /// Let the provisioning command download the OS image itself.
    #[serde(rename = "os")]
    DownloadOs,
    /// A local installation medium (ISO path on the host).
    #[serde(rename = "file")]
    LocalMedia,
    /// A remote installation tree or image.
    #[serde(rename = "url")]
    Url,
    /// An existing disk image to import.
    #[serde(rename = "disk_image")]
    DiskImage,
    /// Network boot (PXE).
    #[serde(rename = "pxe")]
    Pxe,
}

impl SourceType {
    /// Whether a source of this type may be probed for its operating system.
    #[must_use]
    pub fn supports_autodetect(self) -> bool {
        matches!(self, SourceType::Url | SourceType::LocalMedia)
    }

    /// Whether the source string is a host path.
    #[must_use]
    pub fn is_path(self) -> bool {
        matches!(self, SourceType::LocalMedia | SourceType::DiskImage)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::DownloadOs => "os",
            SourceType::LocalMedia => "file",
            SourceType::Url => "url",
            SourceType::DiskImage => "disk_image",
            SourceType::Pxe => "pxe",
        }
    }
}

impl Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates the installation source string for the given source type.
pub(crate) fn validate_source(source_type: SourceType, source: &str) -> Result<(), ValidationError> {
    if source.is_empty() {
        if source_type == SourceType::DownloadOs {
            return Ok(());
        }
        return Err(ValidationError::Field {
            field: "source".to_string(),
            message: "Installation source must not be empty".to_string(),
        });
    }
    if source_type.is_path() && !source.starts_with('/') {
        return Err(ValidationError::Format("Invalid filename".to_string()));
    }
    if source_type == SourceType::Url
        && !ACCEPTED_URL_PREFIXES
            .iter()
            .any(|prefix| source.starts_with(prefix))
    {
        return Err(ValidationError::Format(
            "Source should start with http, ftp or nfs protocol".to_string(),
        ));
    }
    Ok(())
}
