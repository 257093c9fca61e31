//! Operating system catalog records.
//!
//! The catalog is supplied by the host (it mirrors what libosinfo knows) and
//! is only ever read by the dialog.

use crate::core::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resource hints, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ResourceHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<u64>,
}

/// Per installation-medium capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    #[serde(default)]
    pub unattended_installable: bool,
}

/// An operating system known to the host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OsInfo {
    /// Full identifier (e.g. `http://fedoraproject.org/fedora/40`).
    pub id: String,
    /// Short identifier handed to the provisioning command (e.g. `fedora40`).
    pub short_id: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub minimum_resources: ResourceHints,
    #[serde(default)]
    pub recommended_resources: ResourceHints,
    #[serde(default)]
    pub unattended_installable: bool,
    /// Installation profiles (e.g. `desktop`, `jeos`).
    #[serde(default)]
    pub profiles: Vec<String>,
    /// Installation media keyed by media identifier.
    #[serde(default)]
    pub medias: HashMap<String, MediaInfo>,
}

impl OsInfo {
    /// The profile preselected for unattended installs: the first one in
    /// descending sort order.
    #[must_use]
    pub fn default_profile(&self) -> Option<&str> {
        self.profiles.iter().max().map(String::as_str)
    }

    /// Whether the given installation medium supports unattended installs.
    #[must_use]
    pub fn media_supports_unattended(&self, media: &str) -> bool {
        self.medias
            .get(media)
            .is_some_and(|info| info.unattended_installable)
    }
}

/// Ordered collection of OS records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OsCatalog(Vec<OsInfo>);

impl OsCatalog {
    pub fn new(entries: Vec<OsInfo>) -> Self {
        Self(entries)
    }

    /// Looks an OS up by its short identifier.
    #[must_use]
    pub fn find(&self, short_id: &str) -> Option<&OsInfo> {
        self.0.iter().find(|os| os.short_id == short_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsInfo> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validates that an OS from the catalog is selected.
pub(crate) fn validate_os_selection(
    selected: Option<&str>,
    catalog: &OsCatalog,
) -> Result<(), ValidationError> {
    match selected {
        Some(short_id) if catalog.find(short_id).is_some() => Ok(()),
        _ => Err(ValidationError::Field {
            field: "os".to_string(),
            message: "You need to select the most closely matching operating system".to_string(),
        }),
    }
}
