//! The frozen parameter snapshot handed to the provisioning command.

use crate::core::domain::{
    model::{connection_scope::ConnectionScope, vm_draft::VmDraft},
    value_object::{SizeUnit, SourceType, convert_to_unit, convert_to_unit_f64},
};
use serde::Serialize;

/// OS value used when no OS was chosen: the command detects it itself.
pub const AUTO_OS: &str = "auto";

/// Parameters for creating a new VM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVmParams {
    /// Connection scope the VM is defined in.
    pub connection_name: ConnectionScope,
    /// VM name (required).
    pub vm_name: String,
    /// Installation source (path, URL, PXE source or empty for downloads).
    pub source: String,
    pub source_type: SourceType,
    /// OS short identifier, or `"auto"`.
    pub os: String,
    /// Memory in MiB.
    pub memory_size: u64,
    /// Storage in GiB.
    pub storage_size: f64,
    /// `"NewVolume"`, `"NoStorage"` or a pool name.
    pub storage_pool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_volume: Option<String>,
    /// Start the VM once defined.
    pub start_vm: bool,
    pub unattended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
}

impl CreateVmParams {
    /// Freezes a draft into the units the provisioning command expects.
    pub fn from_draft(draft: &VmDraft) -> Self {
        let memory = draft.memory();
        let storage = draft.storage();
        let unattended = draft.unattended_installation();
        let only_if_unattended = |value: Option<&str>| {
            value
                .filter(|v| unattended && !v.is_empty())
                .map(str::to_string)
        };

        Self {
            connection_name: draft.connection(),
            vm_name: draft.name().to_string(),
            source: draft.source().to_string(),
            source_type: draft.source_type(),
            os: draft.os().unwrap_or(AUTO_OS).to_string(),
            memory_size: convert_to_unit(memory.value(), memory.unit(), SizeUnit::MiB),
            storage_size: convert_to_unit_f64(storage.value(), storage.unit(), SizeUnit::GiB),
            storage_pool: draft.storage_target().pool_name().to_string(),
            storage_volume: draft.storage_target().volume_name().map(str::to_string),
            start_vm: draft.start_vm(),
            unattended,
            profile: only_if_unattended(draft.profile()),
            root_password: only_if_unattended(draft.root_password()),
            user_login: only_if_unattended(draft.user_login()),
            user_password: only_if_unattended(draft.user_password()),
        }
    }
}
