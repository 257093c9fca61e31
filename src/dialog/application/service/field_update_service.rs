//! The field update rule: the only way a draft changes.
//!
//! An edit may imply edits of other fields (choosing an OS proposes memory
//! and storage sizes, leaving network boot clears the source, ...). Those
//! follow-ups are pushed onto a queue and drained before `apply` returns, so
//! one top-level edit always yields one consistent draft. A field is applied
//! at most once per top-level edit, which rules out cascade cycles.

use crate::{
    core::{
        domain::{
            model::{
                connection_scope::ConnectionScope, dialog_config::DialogConfig,
                host_context::HostContext, os_info::OsInfo,
                storage_pool::{PoolSelection, StorageTarget},
                vm_draft::VmDraft,
            },
            value_object::{SizeUnit, SourceType, VmName, convert_to_unit},
        },
        infrastructure::os_detector::DetectedOs,
    },
    dialog::application::request::field_update::{FieldKey, FieldUpdate},
};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Follow-up work an edit asks of the dialog.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateEffects {
    /// The source changed, so any pending auto-detection is stale.
    pub source_edited: bool,
    /// Source to auto-detect once the debounce period has passed.
    pub autodetect: Option<String>,
}

pub struct FieldUpdateService<'a> {
    context: &'a HostContext,
    config: &'a DialogConfig,
}

impl<'a> FieldUpdateService<'a> {
    pub fn new(context: &'a HostContext, config: &'a DialogConfig) -> Self {
        Self { context, config }
    }

    /// Applies one edit and every follow-up edit it implies.
    pub fn apply(&self, draft: &mut VmDraft, update: FieldUpdate) -> UpdateEffects {
        self.apply_all(draft, [update])
    }

    /// Records a detected medium and selects the detected OS as one edit.
    pub fn apply_detection(&self, draft: &mut VmDraft, detected: DetectedOs) -> UpdateEffects {
        self.apply_all(
            draft,
            [
                FieldUpdate::DetectedMedia(detected.media),
                FieldUpdate::Os(Some(detected.os)),
            ],
        )
    }

    fn apply_all<const N: usize>(
        &self,
        draft: &mut VmDraft,
        updates: [FieldUpdate; N],
    ) -> UpdateEffects {
        let mut queue = VecDeque::from(updates);
        let mut applied: Vec<FieldKey> = Vec::new();
        let mut effects = UpdateEffects::default();

        while let Some(update) = queue.pop_front() {
            let key = update.key();
            if applied.contains(&key) {
                warn!(field = %key, "Field already updated by this edit, dropping follow-up");
                continue;
            }
            applied.push(key);
            trace!(field = %key, "Applying field update");
            self.apply_one(draft, update, &mut queue, &mut effects);
        }

        effects
    }

    fn selected_os(&self, draft: &VmDraft) -> Option<&'a OsInfo> {
        draft
            .os
            .as_deref()
            .and_then(|short_id| self.context.os_catalog.find(short_id))
    }

    fn apply_one(
        &self,
        draft: &mut VmDraft,
        update: FieldUpdate,
        queue: &mut VecDeque<FieldUpdate>,
        effects: &mut UpdateEffects,
    ) {
        match update {
            FieldUpdate::Name(raw) => {
                draft.name = VmName::normalize(&raw).into_inner();
            }
            FieldUpdate::Source(value) => {
                effects.source_edited = true;
                effects.autodetect = (draft.source_type.supports_autodetect()
                    && !value.is_empty())
                .then(|| value.clone());
                draft.source = value;
                queue.push_back(FieldUpdate::DetectedMedia(None));
            }
            FieldUpdate::DetectedMedia(media) => {
                draft.detected_media = media;
                if draft.unattended_installation
                    && !draft.unattended_supported(self.selected_os(draft))
                {
                    queue.push_back(FieldUpdate::UnattendedInstallation(false));
                }
            }
            FieldUpdate::SourceType(source_type) => {
                let previous = std::mem::replace(&mut draft.source_type, source_type);
                let source = if source_type == SourceType::Pxe && previous != SourceType::Pxe {
                    Some(
                        self.context
                            .initial_pxe_source(draft.connection)
                            .unwrap_or_default(),
                    )
                } else if previous == SourceType::Pxe && source_type != SourceType::Pxe {
                    Some(String::new())
                } else {
                    None
                };
                match source {
                    Some(source) => queue.push_back(FieldUpdate::Source(source)),
                    None => {
                        if draft.unattended_installation
                            && !draft.unattended_supported(self.selected_os(draft))
                        {
                            queue.push_back(FieldUpdate::UnattendedInstallation(false));
                        }
                    }
                }
            }
            FieldUpdate::Os(short_id) => {
                draft.os = short_id;
                let os = self.selected_os(draft);
                draft.minimum_memory = os.and_then(|os| os.minimum_resources.ram).unwrap_or(0);
                draft.minimum_storage = os
                    .and_then(|os| os.minimum_resources.storage)
                    .unwrap_or(0);

                if let Some(os) = os {
                    queue.push_back(FieldUpdate::Profile(
                        os.default_profile().map(str::to_string),
                    ));
                    if let Some(ram) = os.recommended_resources.ram {
                        let (unit, value) = recommended_size(ram, draft.memory.unit());
                        if let Some(unit) = unit {
                            queue.push_back(FieldUpdate::MemorySizeUnit(unit));
                        }
                        queue.push_back(FieldUpdate::MemorySize(value));
                    }
                    if let Some(storage) = os.recommended_resources.storage {
                        let (unit, value) = recommended_size(storage, draft.storage.unit());
                        if let Some(unit) = unit {
                            queue.push_back(FieldUpdate::StorageSizeUnit(unit));
                        }
                        queue.push_back(FieldUpdate::StorageSize(value));
                    }
                }
                if draft.unattended_installation && !draft.unattended_supported(os) {
                    queue.push_back(FieldUpdate::UnattendedInstallation(false));
                }
            }
            FieldUpdate::MemorySize(value) => {
                let value = match self.context.node_max_memory {
                    Some(max) => value.min(convert_to_unit(max, SizeUnit::B, draft.memory.unit())),
                    None => value,
                };
                draft.memory = draft.memory.with_value(value);
            }
            FieldUpdate::StorageSize(value) => {
                let value = match self.context.available_space(draft.connection, self.config) {
                    Some(space) => {
                        value.min(convert_to_unit(space, SizeUnit::B, draft.storage.unit()))
                    }
                    None => value,
                };
                draft.storage = draft.storage.with_value(value);
            }
            FieldUpdate::MemorySizeUnit(unit) => {
                draft.memory = draft.memory.convert_to(unit);
            }
            FieldUpdate::StorageSizeUnit(unit) => {
                draft.storage = draft.storage.convert_to(unit);
            }
            FieldUpdate::StoragePool(selection) => {
                draft.storage_target = match selection {
                    PoolSelection::NewVolume => StorageTarget::NewVolume,
                    PoolSelection::NoStorage => StorageTarget::NoStorage,
                    PoolSelection::Pool(pool) => {
                        let volume = self
                            .context
                            .pool(draft.connection, &pool)
                            .and_then(|p| p.first_volume())
                            .map(str::to_string);
                        StorageTarget::Existing { pool, volume }
                    }
                };
            }
            FieldUpdate::StorageVolume(name) => match &mut draft.storage_target {
                StorageTarget::Existing { volume, .. } => *volume = Some(name),
                _ => debug!(volume = %name, "No pool selected, ignoring volume"),
            },
            FieldUpdate::ConnectionName(scope) => {
                draft.connection = scope;
                if draft.source_type == SourceType::Pxe && scope == ConnectionScope::Session {
                    queue.push_back(FieldUpdate::SourceType(SourceType::LocalMedia));
                }
                if matches!(draft.storage_target, StorageTarget::Existing { .. }) {
                    queue.push_back(FieldUpdate::StoragePool(PoolSelection::NewVolume));
                }
            }
            FieldUpdate::UnattendedInstallation(enabled) => {
                draft.unattended_installation = enabled;
                if enabled {
                    queue.push_back(FieldUpdate::StartVm(true));
                }
            }
            FieldUpdate::Profile(profile) => draft.profile = profile,
            FieldUpdate::RootPassword(password) => draft.root_password = password,
            FieldUpdate::UserLogin(login) => draft.user_login = login,
            FieldUpdate::UserPassword(password) => draft.user_password = password,
            FieldUpdate::StartVm(start) => draft.start_vm = start,
        }
    }
}

/// Expresses a recommended byte count in `unit`. When that would display as
/// 0, proposes switching to MiB instead.
fn recommended_size(bytes: u64, unit: SizeUnit) -> (Option<SizeUnit>, u64) {
    let value = convert_to_unit(bytes, SizeUnit::B, unit);
    if value == 0 && unit > SizeUnit::MiB {
        (
            Some(SizeUnit::MiB),
            convert_to_unit(bytes, SizeUnit::B, SizeUnit::MiB),
        )
    } else {
        (None, value)
    }
}
