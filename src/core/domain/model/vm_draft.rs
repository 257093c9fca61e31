//! The in-progress set of VM creation parameters.
//!
//! A draft lives exactly as long as one dialog session. Its fields are only
//! changed by the field update service, so every read sees a state where all
//! derived fields agree with the ones they derive from.

use crate::core::domain::{
    model::{
        connection_scope::ConnectionScope, dialog_config::DialogConfig,
        host_context::HostContext, os_info::OsInfo, storage_pool::StorageTarget,
    },
    value_object::{Size, SizeUnit, SourceType, convert_to_unit},
};
use serde::{Deserialize, Serialize};

/// What the dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogMode {
    /// Install a new VM from some installation source.
    #[default]
    Create,
    /// Import an existing disk image.
    Import,
}

/// Draft VM parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct VmDraft {
    pub(crate) mode: DialogMode,
    pub(crate) name: String,
    pub(crate) connection: ConnectionScope,
    pub(crate) source_type: SourceType,
    pub(crate) source: String,
    pub(crate) detected_media: Option<String>,
    pub(crate) os: Option<String>,
    pub(crate) minimum_memory: u64,
    pub(crate) minimum_storage: u64,
    pub(crate) memory: Size,
    pub(crate) storage: Size,
    pub(crate) storage_target: StorageTarget,
    pub(crate) unattended_installation: bool,
    pub(crate) profile: Option<String>,
    pub(crate) root_password: Option<String>,
    pub(crate) user_login: Option<String>,
    pub(crate) user_password: Option<String>,
    pub(crate) start_vm: bool,
}

impl VmDraft {
    /// Builds the draft a freshly opened dialog starts from.
    pub fn new(mode: DialogMode, context: &HostContext, config: &DialogConfig) -> Self {
        let source_type = match mode {
            DialogMode::Import => SourceType::DiskImage,
            DialogMode::Create if context.download_os_supported => SourceType::DownloadOs,
            DialogMode::Create => SourceType::LocalMedia,
        };

        let mut memory = config.default_memory;
        if let Some(max) = context.node_max_memory {
            let max = convert_to_unit(max, SizeUnit::B, memory.unit());
            memory = memory.with_value(memory.value().min(max));
        }

        Self {
            mode,
            name: String::new(),
            connection: ConnectionScope::System,
            source_type,
            source: String::new(),
            detected_media: None,
            os: None,
            minimum_memory: 0,
            minimum_storage: 0,
            memory,
            storage: config.default_storage,
            storage_target: StorageTarget::NewVolume,
            unattended_installation: false,
            profile: None,
            root_password: None,
            user_login: None,
            user_password: None,
            start_vm: mode == DialogMode::Import,
        }
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> ConnectionScope {
        self.connection
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Media identifier reported by the last successful auto-detection.
    pub fn detected_media(&self) -> Option<&str> {
        self.detected_media.as_deref()
    }

    /// Short identifier of the selected OS.
    pub fn os(&self) -> Option<&str> {
        self.os.as_deref()
    }

    /// Minimum memory of the selected OS in bytes (0 when unknown).
    pub fn minimum_memory(&self) -> u64 {
        self.minimum_memory
    }

    /// Minimum storage of the selected OS in bytes (0 when unknown).
    pub fn minimum_storage(&self) -> u64 {
        self.minimum_storage
    }

    pub fn memory(&self) -> Size {
        self.memory
    }

    pub fn storage(&self) -> Size {
        self.storage
    }

    pub fn storage_target(&self) -> &StorageTarget {
        &self.storage_target
    }

    pub fn unattended_installation(&self) -> bool {
        self.unattended_installation
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn root_password(&self) -> Option<&str> {
        self.root_password.as_deref()
    }

    pub fn user_login(&self) -> Option<&str> {
        self.user_login.as_deref()
    }

    pub fn user_password(&self) -> Option<&str> {
        self.user_password.as_deref()
    }

    pub fn start_vm(&self) -> bool {
        self.start_vm
    }

    /// Whether an unattended install can be offered for `os` with the current
    /// source.
    ///
    /// Downloaded images always qualify when the OS does; local media and URLs
    /// only once auto-detection identified a medium that supports it.
    #[must_use]
    pub fn unattended_supported(&self, os: Option<&OsInfo>) -> bool {
        let Some(os) = os.filter(|os| os.unattended_installable) else {
            return false;
        };
        match self.source_type {
            SourceType::DownloadOs => true,
            SourceType::Url | SourceType::LocalMedia => self
                .detected_media
                .as_deref()
                .is_some_and(|media| os.media_supports_unattended(media)),
            SourceType::DiskImage | SourceType::Pxe => false,
        }
    }
}
