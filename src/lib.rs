//! Form state, validation and submission engine for a "create / import
//! virtual machine" dialog.
//!
//! A [`CreateVmDialog`] owns the draft of one dialog session. Every edit goes
//! through [`CreateVmDialog::update`], which applies the field's rule and all
//! follow-up edits it implies before returning. Submitting validates the
//! draft, freezes it into [`CreateVmParams`] and hands that to a
//! [`VmCreator`] with a bounded wait.

mod core;
mod dialog;

#[cfg(test)]
mod tests;

pub use crate::core::{
    domain::{
        error::{MachinesError, MachinesResult, ValidationError},
        model::{
            connection_scope::ConnectionScope,
            create_vm_params::{AUTO_OS, CreateVmParams},
            dialog_config::DialogConfig,
            host_context::{HostContext, ScopeResources},
            network::{NetworkDevice, PxeSource, VirtualNetwork, initial_pxe_source, pxe_sources},
            os_info::{MediaInfo, OsCatalog, OsInfo, ResourceHints},
            storage_pool::{PoolSelection, StoragePool, StorageTarget, StorageVolume},
            vm_draft::{DialogMode, VmDraft},
        },
        value_object::{
            ACCEPTED_URL_PREFIXES, PasswordQuality, PasswordStrength, Size, SizeUnit, SourceType,
            VmName, convert_to_unit, convert_to_unit_f64, password_strength,
        },
    },
    infrastructure::{
        notifier::{Notification, Notifier},
        os_detector::{DetectedOs, OsDetector},
        vm_creator::VmCreator,
    },
};
pub use crate::dialog::application::{
    request::field_update::{FieldKey, FieldUpdate},
    response::{
        detection_outcome::DetectionOutcome,
        submit_outcome::SubmitOutcome,
        validation_report::{FormSection, ValidationReport},
    },
};

use crate::dialog::application::service::{
    autodetect_service::AutodetectService,
    field_update_service::{FieldUpdateService, UpdateEffects},
    submit_service::SubmitService,
    validation_service::ValidationService,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One session of the create / import VM dialog.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use leeca_machines::{
///     CreateVmDialog, CreateVmParams, DetectedOs, DialogMode, FieldUpdate, HostContext,
///     MachinesResult, Notifier, OsDetector, SubmitOutcome, VmCreator,
/// };
///
/// struct Virtinstall;
///
/// #[async_trait::async_trait]
/// impl VmCreator for Virtinstall {
///     async fn create_vm(&self, _params: CreateVmParams) -> MachinesResult<()> {
///         Ok(())
///     }
/// }
///
/// struct Osinfo;
///
/// #[async_trait::async_trait]
/// impl OsDetector for Osinfo {
///     async fn detect_os(&self, _source: String) -> MachinesResult<Option<DetectedOs>> {
///         Ok(None)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> MachinesResult<()> {
///     let (notifier, _notifications) = Notifier::channel();
///     let mut dialog = CreateVmDialog::builder()
///         .host_context(HostContext::from_json(r#"{ "downloadOsSupported": true }"#)?)
///         .creator(Arc::new(Virtinstall))
///         .detector(Arc::new(Osinfo))
///         .notifier(notifier)
///         .mode(DialogMode::Create)
///         .open()?;
///
///     dialog.update(FieldUpdate::Name("web server".to_string()))?;
///     if let SubmitOutcome::Invalid(report) = dialog.submit().await? {
///         for (section, reason) in report.iter() {
///             println!("{section}: {reason}");
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct CreateVmDialog {
    context: HostContext,
    config: DialogConfig,
    draft: Option<VmDraft>,
    show_validation_errors: bool,
    autodetect: AutodetectService,
    submitter: SubmitService,
}

/// Builder for a [`CreateVmDialog`] session
#[derive(Default)]
pub struct CreateVmDialogBuilder {
    context: Option<HostContext>,
    config: Option<DialogConfig>,
    creator: Option<Arc<dyn VmCreator>>,
    detector: Option<Arc<dyn OsDetector>>,
    notifier: Option<Notifier>,
    mode: DialogMode,
}

fn required(field: &str, message: &str) -> MachinesError {
    ValidationError::Field {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

impl CreateVmDialogBuilder {
    /// Snapshot of the host the dialog targets.
    pub fn host_context(mut self, context: HostContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Overrides [`DialogConfig::default`].
    pub fn config(mut self, config: DialogConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Backend that provisions the submitted VM.
    pub fn creator(mut self, creator: Arc<dyn VmCreator>) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Backend used for OS auto-detection.
    pub fn detector(mut self, detector: Arc<dyn OsDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Where creation failures are reported.
    pub fn notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Create or import; defaults to [`DialogMode::Create`].
    pub fn mode(mut self, mode: DialogMode) -> Self {
        self.mode = mode;
        self
    }

    /// Opens the dialog with a freshly defaulted draft.
    ///
    /// # Errors
    ///
    /// Returns an error if a collaborator or the host context is missing, or
    /// if the configuration is invalid.
    pub fn open(self) -> MachinesResult<CreateVmDialog> {
        let context = self
            .context
            .ok_or_else(|| required("host_context", "Host context is required"))?;
        let creator = self
            .creator
            .ok_or_else(|| required("creator", "VM creator is required"))?;
        let detector = self
            .detector
            .ok_or_else(|| required("detector", "OS detector is required"))?;
        let notifier = self
            .notifier
            .ok_or_else(|| required("notifier", "Notifier is required"))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let draft = VmDraft::new(self.mode, &context, &config);
        info!(
            mode = ?self.mode,
            source_type = %draft.source_type(),
            os_count = context.os_catalog.len(),
            "Opened VM dialog"
        );

        Ok(CreateVmDialog {
            autodetect: AutodetectService::new(detector, config.autodetect_debounce),
            submitter: SubmitService::new(creator, notifier, config.creation_grace_period),
            context,
            config,
            draft: Some(draft),
            show_validation_errors: false,
        })
    }
}

impl CreateVmDialog {
    /// Creates a new builder for a dialog session
    pub fn builder() -> CreateVmDialogBuilder {
        CreateVmDialogBuilder::default()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// The current draft, `None` once the dialog is closed.
    pub fn draft(&self) -> Option<&VmDraft> {
        self.draft.as_ref()
    }

    pub fn host_context(&self) -> &HostContext {
        &self.context
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Applies one field edit and every follow-up edit it implies.
    ///
    /// Source edits supersede any pending auto-detection and, for URL and
    /// local media sources, schedule a new one. Must be called from within a
    /// tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `MachinesError::DialogClosed` once the dialog is closed.
    pub fn update(&mut self, update: FieldUpdate) -> MachinesResult<()> {
        let draft = self.draft.as_mut().ok_or(MachinesError::DialogClosed)?;
        let effects = FieldUpdateService::new(&self.context, &self.config).apply(draft, update);
        self.handle_effects(effects);
        Ok(())
    }

    fn handle_effects(&mut self, effects: UpdateEffects) {
        match effects.autodetect {
            Some(source) => self.autodetect.schedule(source),
            None if effects.source_edited => self.autodetect.supersede(),
            None => {}
        }
    }

    /// Waits for the pending OS auto-detection and applies its result.
    ///
    /// Returns `Ok(None)` when no detection is pending or the pending one was
    /// superseded. A detected OS missing from the catalog counts as not
    /// recognised. Detection failures leave the draft untouched.
    ///
    /// # Errors
    ///
    /// Returns `MachinesError::DialogClosed` once the dialog is closed.
    pub async fn next_detection(&mut self) -> MachinesResult<Option<DetectionOutcome>> {
        if self.draft.is_none() {
            return Err(MachinesError::DialogClosed);
        }
        let Some(result) = self.autodetect.next_result().await else {
            return Ok(None);
        };
        let draft = self.draft.as_mut().ok_or(MachinesError::DialogClosed)?;

        let outcome = match result.outcome {
            Ok(Some(detected)) if self.context.os_catalog.find(&detected.os).is_some() => {
                info!(source = %result.source, os = %detected.os, "Detected operating system");
                FieldUpdateService::new(&self.context, &self.config)
                    .apply_detection(draft, detected.clone());
                DetectionOutcome::Applied(detected)
            }
            Ok(Some(detected)) => {
                debug!(os = %detected.os, "Detected operating system is not in the catalog");
                DetectionOutcome::NotRecognised
            }
            Ok(None) => DetectionOutcome::NotRecognised,
            Err(e) => {
                warn!(source = %result.source, error = %e, "OS auto-detection failed");
                DetectionOutcome::Failed(e.to_string())
            }
        };
        Ok(Some(outcome))
    }

    fn validate(&self, draft: &VmDraft) -> ValidationReport {
        let names = &self.context.resources(draft.connection()).vm_names;
        ValidationService::new(
            &self.context.os_catalog,
            names,
            self.context.current_user_is_root,
        )
        .require_os(self.config.require_os)
        .validate(draft)
    }

    /// Validates the current draft.
    ///
    /// # Errors
    ///
    /// Returns `MachinesError::DialogClosed` once the dialog is closed.
    pub fn validation(&self) -> MachinesResult<ValidationReport> {
        let draft = self.draft.as_ref().ok_or(MachinesError::DialogClosed)?;
        Ok(self.validate(draft))
    }

    /// Whether a submit attempt was blocked, so failures should be shown.
    pub fn is_showing_validation_errors(&self) -> bool {
        self.show_validation_errors
    }

    /// Validates the draft and, if it passes, hands it to the VM creator.
    ///
    /// An invalid draft keeps the dialog open and turns on showing validation
    /// errors. Otherwise the dialog closes once creation settles or the grace
    /// period runs out, whichever is first.
    ///
    /// # Errors
    ///
    /// Returns `MachinesError::DialogClosed` once the dialog is closed.
    pub async fn submit(&mut self) -> MachinesResult<SubmitOutcome> {
        let draft = self.draft.as_ref().ok_or(MachinesError::DialogClosed)?;
        let report = self.validate(draft);
        if !report.is_empty() {
            debug!(failures = report.len(), "Submit blocked by validation failures");
            self.show_validation_errors = true;
            return Ok(SubmitOutcome::Invalid(report));
        }

        let params = CreateVmParams::from_draft(draft);
        self.autodetect.supersede();
        let outcome = self.submitter.submit(params).await;
        self.close();
        Ok(outcome)
    }

    /// Cancels pending auto-detection and discards the draft.
    pub fn close(&mut self) {
        self.autodetect.supersede();
        if self.draft.take().is_some() {
            debug!("Closed VM dialog");
        }
    }

    /// The catalog record of the selected OS.
    pub fn selected_os(&self) -> Option<&OsInfo> {
        self.draft
            .as_ref()
            .and_then(|draft| draft.os())
            .and_then(|short_id| self.context.os_catalog.find(short_id))
    }

    /// Whether the network boot source type can be offered.
    pub fn network_boot_supported(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|draft| self.context.network_boot_supported(draft.connection()))
    }

    /// Network boot sources of the active connection scope.
    pub fn pxe_sources(&self) -> Vec<PxeSource> {
        self.draft.as_ref().map_or_else(Vec::new, |draft| {
            let resources = self.context.resources(draft.connection());
            pxe_sources(&resources.networks, &resources.network_devices)
        })
    }

    /// Whether the unattended install option can be offered.
    pub fn unattended_supported(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|draft| draft.unattended_supported(self.selected_os()))
    }
}
