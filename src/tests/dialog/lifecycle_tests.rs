use super::open_idle_dialog;
use crate::{
    ConnectionScope, CreateVmDialog, DialogConfig, DialogMode, FieldUpdate, FormSection,
    MachinesError, MachinesResult, Notifier, SourceType, StorageTarget,
    core::infrastructure::{os_detector::MockOsDetector, vm_creator::MockVmCreator},
    tests::fixtures::host_context,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_open_create_dialog_with_defaults() -> MachinesResult<()> {
    let (dialog, _notifications) = open_idle_dialog(DialogMode::Create);
    assert!(dialog.is_open());
    assert!(!dialog.is_showing_validation_errors());

    let draft = dialog.draft().unwrap();
    assert_eq!(draft.mode(), DialogMode::Create);
    assert_eq!(draft.source_type(), SourceType::DownloadOs);
    assert_eq!(draft.connection(), ConnectionScope::System);
    assert_eq!(draft.storage_target(), &StorageTarget::NewVolume);
    assert!(!draft.start_vm());

    let report = dialog.validation()?;
    assert!(report.contains(FormSection::Name));
    assert!(report.contains(FormSection::Os));
    assert!(!report.contains(FormSection::Source));
    Ok(())
}

#[tokio::test]
async fn test_open_import_dialog_with_defaults() {
    let (dialog, _notifications) = open_idle_dialog(DialogMode::Import);
    let draft = dialog.draft().unwrap();
    assert_eq!(draft.source_type(), SourceType::DiskImage);
    assert!(draft.start_vm());
}

#[test]
fn test_open_requires_collaborators() {
    let (notifier, _notifications) = Notifier::channel();
    let result = CreateVmDialog::builder()
        .host_context(host_context())
        .detector(Arc::new(MockOsDetector::new()))
        .notifier(notifier)
        .open();
    match result {
        Err(MachinesError::Validation(e)) => assert_eq!(e.reason(), "VM creator is required"),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("dialog opened without a VM creator"),
    }

    let result = CreateVmDialog::builder()
        .creator(Arc::new(MockVmCreator::new()))
        .detector(Arc::new(MockOsDetector::new()))
        .open();
    assert!(matches!(result, Err(MachinesError::Validation(_))));
}

#[test]
fn test_open_rejects_invalid_config() {
    let (notifier, _notifications) = Notifier::channel();
    let result = CreateVmDialog::builder()
        .host_context(host_context())
        .config(DialogConfig {
            autodetect_debounce: Duration::ZERO,
            ..Default::default()
        })
        .creator(Arc::new(MockVmCreator::new()))
        .detector(Arc::new(MockOsDetector::new()))
        .notifier(notifier)
        .open();
    assert!(matches!(result, Err(MachinesError::Configuration(_))));
}

#[tokio::test]
async fn test_closed_dialog_rejects_edits() {
    let (mut dialog, _notifications) = open_idle_dialog(DialogMode::Create);
    dialog.close();
    assert!(!dialog.is_open());
    assert!(dialog.draft().is_none());

    assert!(matches!(
        dialog.update(FieldUpdate::Name("vm".to_string())),
        Err(MachinesError::DialogClosed)
    ));
    assert!(matches!(dialog.validation(), Err(MachinesError::DialogClosed)));
    assert!(matches!(dialog.submit().await, Err(MachinesError::DialogClosed)));
    assert!(matches!(
        dialog.next_detection().await,
        Err(MachinesError::DialogClosed)
    ));

    // closing twice is harmless
    dialog.close();
}

#[tokio::test]
async fn test_network_boot_follows_connection_scope() -> MachinesResult<()> {
    let (mut dialog, _notifications) = open_idle_dialog(DialogMode::Create);
    assert!(dialog.network_boot_supported());
    let sources: Vec<String> = dialog.pxe_sources().into_iter().map(|s| s.value).collect();
    assert_eq!(sources, ["network=default", "type=direct,source=eth0"]);

    dialog.update(FieldUpdate::SourceType(SourceType::Pxe))?;
    assert_eq!(dialog.draft().unwrap().source(), "network=default");

    dialog.update(FieldUpdate::ConnectionName(ConnectionScope::Session))?;
    assert!(!dialog.network_boot_supported());
    assert!(dialog.pxe_sources().is_empty());
    let draft = dialog.draft().unwrap();
    assert_eq!(draft.source_type(), SourceType::LocalMedia);
    assert_eq!(draft.source(), "");
    Ok(())
}

#[tokio::test]
async fn test_unattended_offered_for_downloaded_os() -> MachinesResult<()> {
    let (mut dialog, _notifications) = open_idle_dialog(DialogMode::Create);
    assert!(!dialog.unattended_supported());

    dialog.update(FieldUpdate::Os(Some("fedora40".to_string())))?;
    assert_eq!(dialog.selected_os().map(|os| os.name.as_str()), Some("Fedora Linux 40"));
    assert!(dialog.unattended_supported());

    dialog.update(FieldUpdate::Os(Some("alpine3".to_string())))?;
    assert!(!dialog.unattended_supported());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_name_depends_on_scope() -> MachinesResult<()> {
    let (mut dialog, _notifications) = open_idle_dialog(DialogMode::Create);
    dialog.update(FieldUpdate::Name("session-vm".to_string()))?;
    assert!(!dialog.validation()?.contains(FormSection::Name));

    dialog.update(FieldUpdate::ConnectionName(ConnectionScope::Session))?;
    assert_eq!(
        dialog.validation()?.get(FormSection::Name),
        Some("VM session-vm already exists")
    );
    Ok(())
}
