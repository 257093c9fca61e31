//! Turns a draft into a per-section validation report.
//!
//! Every rule runs on its own; one failing section never hides another.

use crate::{
    core::domain::{
        model::{
            os_info::{OsCatalog, validate_os_selection},
            storage_pool::StorageTarget,
            vm_draft::VmDraft,
        },
        value_object::{
            SourceType, validate_credentials, validate_size, validate_source, validate_vm_name,
        },
    },
    dialog::application::response::validation_report::{FormSection, ValidationReport},
};

pub struct ValidationService<'a> {
    catalog: &'a OsCatalog,
    existing_names: &'a [String],
    current_user_is_root: bool,
    require_os: bool,
}

impl<'a> ValidationService<'a> {
    /// `existing_names` must already be narrowed to the draft's connection
    /// scope.
    pub fn new(
        catalog: &'a OsCatalog,
        existing_names: &'a [String],
        current_user_is_root: bool,
    ) -> Self {
        Self {
            catalog,
            existing_names,
            current_user_is_root,
            require_os: true,
        }
    }

    /// Whether a missing OS is a failure. Defaults to `true`.
    #[must_use]
    pub fn require_os(mut self, require_os: bool) -> Self {
        self.require_os = require_os;
        self
    }

    pub fn validate(&self, draft: &VmDraft) -> ValidationReport {
        let mut report = ValidationReport::default();
        let os = draft.os().and_then(|short_id| self.catalog.find(short_id));

        if let Err(e) = validate_vm_name(draft.name(), self.existing_names) {
            report.insert(FormSection::Name, e.reason());
        }

        if self.require_os {
            if let Err(e) = validate_os_selection(draft.os(), self.catalog) {
                report.insert(FormSection::Os, e.reason());
            }
        }

        if let Err(e) = validate_source(draft.source_type(), draft.source()) {
            report.insert(FormSection::Source, e.reason());
        }

        let minimum_memory = os.and_then(|os| os.minimum_resources.ram);
        if let Err(e) = validate_size("Memory", draft.memory(), minimum_memory) {
            report.insert(FormSection::Memory, e.reason());
        }

        if *draft.storage_target() == StorageTarget::NewVolume
            && draft.source_type() != SourceType::DiskImage
        {
            let minimum_storage = os.and_then(|os| os.minimum_resources.storage);
            if let Err(e) = validate_size("Storage", draft.storage(), minimum_storage) {
                report.insert(FormSection::Storage, e.reason());
            }
        }

        if let Err(e) = validate_credentials(
            draft.unattended_installation(),
            draft.root_password(),
            draft.user_password(),
            self.current_user_is_root,
        ) {
            report.insert(FormSection::Password, e.reason());
        }

        report
    }
}
