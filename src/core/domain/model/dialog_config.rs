use crate::core::domain::{
    error::{MachinesError, MachinesResult},
    value_object::{
        Size, SizeUnit,
        serde_helpers::duration_millis,
    },
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables of a dialog session.
///
/// Every field has a default, so a JSON document only needs the overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogConfig {
    /// Quiet period after the last source edit before OS auto-detection runs.
    #[serde(with = "duration_millis")]
    pub autodetect_debounce: Duration,
    /// How long submission waits for the creation collaborator before the
    /// dialog closes anyway.
    #[serde(with = "duration_millis")]
    pub creation_grace_period: Duration,
    /// Whether submitting requires an OS from the catalog.
    pub require_os: bool,
    pub default_memory: Size,
    pub default_storage: Size,
    /// Target path of the pool new volumes land in on the system scope.
    pub system_images_path: String,
    /// Trailing path of that pool on the session scope (it lives in `$HOME`).
    pub session_images_suffix: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            autodetect_debounce: Duration::from_millis(250),
            creation_grace_period: Duration::from_millis(3000),
            require_os: true,
            default_memory: Size::new(1, SizeUnit::GiB),
            default_storage: Size::new(10, SizeUnit::GiB),
            system_images_path: "/var/lib/libvirt/images".to_string(),
            session_images_suffix: ".local/share/libvirt/images".to_string(),
        }
    }
}

impl DialogConfig {
    /// Loads a configuration from JSON, falling back to defaults for missing
    /// fields.
    ///
    /// # Errors
    /// Returns `MachinesError::Configuration` if the JSON is malformed or the
    /// resulting configuration is unusable.
    pub fn from_json(json: &str) -> MachinesResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MachinesError::Configuration(format!("Invalid dialog config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the dialog cannot work with.
    ///
    /// # Errors
    /// Returns `MachinesError::Configuration` describing the first problem.
    pub fn validate(&self) -> MachinesResult<()> {
        if self.autodetect_debounce.is_zero() {
            return Err(MachinesError::Configuration(
                "Auto-detection debounce must be greater than zero".to_string(),
            ));
        }
        if self.system_images_path.is_empty() || self.session_images_suffix.is_empty() {
            return Err(MachinesError::Configuration(
                "Default image pool paths must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
