use crate::core::domain::{
    model::{connection_scope::ConnectionScope, storage_pool::PoolSelection},
    value_object::{SizeUnit, SourceType},
};
use std::fmt::{self, Display};

/// One edit of one dialog field, carrying the raw new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Source(String),
    SourceType(SourceType),
    /// Short identifier of the chosen OS, `None` to clear.
    Os(Option<String>),
    MemorySize(u64),
    MemorySizeUnit(SizeUnit),
    StorageSize(u64),
    StorageSizeUnit(SizeUnit),
    StoragePool(PoolSelection),
    StorageVolume(String),
    ConnectionName(ConnectionScope),
    UnattendedInstallation(bool),
    Profile(Option<String>),
    RootPassword(Option<String>),
    UserLogin(Option<String>),
    UserPassword(Option<String>),
    StartVm(bool),
    /// Installation medium identified by auto-detection.
    DetectedMedia(Option<String>),
}

/// Identifies the field an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Source,
    SourceType,
    Os,
    MemorySize,
    MemorySizeUnit,
    StorageSize,
    StorageSizeUnit,
    StoragePool,
    StorageVolume,
    ConnectionName,
    UnattendedInstallation,
    Profile,
    RootPassword,
    UserLogin,
    UserPassword,
    StartVm,
    DetectedMedia,
}

impl FieldUpdate {
    #[must_use]
    pub fn key(&self) -> FieldKey {
        match self {
            FieldUpdate::Name(_) => FieldKey::Name,
            FieldUpdate::Source(_) => FieldKey::Source,
            FieldUpdate::SourceType(_) => FieldKey::SourceType,
            FieldUpdate::Os(_) => FieldKey::Os,
            FieldUpdate::MemorySize(_) => FieldKey::MemorySize,
            FieldUpdate::MemorySizeUnit(_) => FieldKey::MemorySizeUnit,
            FieldUpdate::StorageSize(_) => FieldKey::StorageSize,
            FieldUpdate::StorageSizeUnit(_) => FieldKey::StorageSizeUnit,
            FieldUpdate::StoragePool(_) => FieldKey::StoragePool,
            FieldUpdate::StorageVolume(_) => FieldKey::StorageVolume,
            FieldUpdate::ConnectionName(_) => FieldKey::ConnectionName,
            FieldUpdate::UnattendedInstallation(_) => FieldKey::UnattendedInstallation,
            FieldUpdate::Profile(_) => FieldKey::Profile,
            FieldUpdate::RootPassword(_) => FieldKey::RootPassword,
            FieldUpdate::UserLogin(_) => FieldKey::UserLogin,
            FieldUpdate::UserPassword(_) => FieldKey::UserPassword,
            FieldUpdate::StartVm(_) => FieldKey::StartVm,
            FieldUpdate::DetectedMedia(_) => FieldKey::DetectedMedia,
        }
    }
}

impl FieldKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "vmName",
            FieldKey::Source => "source",
            FieldKey::SourceType => "sourceType",
            FieldKey::Os => "os",
            FieldKey::MemorySize => "memorySize",
            FieldKey::MemorySizeUnit => "memorySizeUnit",
            FieldKey::StorageSize => "storageSize",
            FieldKey::StorageSizeUnit => "storageSizeUnit",
            FieldKey::StoragePool => "storagePool",
            FieldKey::StorageVolume => "storageVolume",
            FieldKey::ConnectionName => "connectionName",
            FieldKey::UnattendedInstallation => "unattendedInstallation",
            FieldKey::Profile => "profile",
            FieldKey::RootPassword => "rootPassword",
            FieldKey::UserLogin => "userLogin",
            FieldKey::UserPassword => "userPassword",
            FieldKey::StartVm => "startVm",
            FieldKey::DetectedMedia => "detectedMedia",
        }
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
