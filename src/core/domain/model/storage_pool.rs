use serde::{Deserialize, Serialize};

/// A volume inside a storage pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageVolume {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A storage pool of one connection scope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePool {
    pub name: String,
    /// Directory (or device) backing the pool.
    pub target_path: String,
    /// Free space in bytes.
    #[serde(default)]
    pub available: u64,
    #[serde(default)]
    pub volumes: Vec<StorageVolume>,
}

impl StoragePool {
    /// Name of the volume preselected when the pool is chosen.
    #[must_use]
    pub fn first_volume(&self) -> Option<&str> {
        self.volumes.first().map(|volume| volume.name.as_str())
    }
}

/// The storage pool choice made in the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolSelection {
    /// Create a fresh volume in the scope's default location.
    NewVolume,
    /// Create the VM without any disk.
    NoStorage,
    /// Use a volume of an existing pool.
    Pool(String),
}

/// Storage target kept in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageTarget {
    #[default]
    NewVolume,
    NoStorage,
    Existing {
        pool: String,
        volume: Option<String>,
    },
}

impl StorageTarget {
    /// The pool name handed to the provisioning command.
    #[must_use]
    pub fn pool_name(&self) -> &str {
        match self {
            StorageTarget::NewVolume => "NewVolume",
            StorageTarget::NoStorage => "NoStorage",
            StorageTarget::Existing { pool, .. } => pool,
        }
    }

    #[must_use]
    pub fn volume_name(&self) -> Option<&str> {
        match self {
            StorageTarget::Existing { volume, .. } => volume.as_deref(),
            _ => None,
        }
    }
}
