use super::open_dialog;
use crate::{
    AUTO_OS, ConnectionScope, CreateVmDialog, CreateVmParams, DialogConfig, DialogMode,
    FieldUpdate, FormSection, MachinesError, MachinesResult, Notifier, SourceType, SubmitOutcome,
    VmCreator,
    core::infrastructure::{os_detector::MockOsDetector, vm_creator::MockVmCreator},
    tests::fixtures::host_context,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

fn idle_detector() -> MockOsDetector {
    let mut detector = MockOsDetector::new();
    detector.expect_detect_os().never();
    detector
}

#[tokio::test(start_paused = true)]
async fn test_invalid_draft_is_not_submitted() -> MachinesResult<()> {
    let mut creator = MockVmCreator::new();
    creator.expect_create_vm().never();
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        creator,
        idle_detector(),
    );

    let outcome = dialog.submit().await?;
    let SubmitOutcome::Invalid(report) = outcome else {
        panic!("invalid draft was submitted: {outcome:?}");
    };
    assert_eq!(report.get(FormSection::Name), Some("Name must not be empty"));
    assert_eq!(
        report.get(FormSection::Os),
        Some("You need to select the most closely matching operating system")
    );
    assert!(dialog.is_open());
    assert!(dialog.is_showing_validation_errors());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_submit_without_os_sends_auto() -> MachinesResult<()> {
    let mut creator = MockVmCreator::new();
    creator
        .expect_create_vm()
        .withf(|params: &CreateVmParams| params.vm_name == "my_vm" && params.os == AUTO_OS)
        .times(1)
        .returning(|_| Ok(()));
    let config = DialogConfig {
        require_os: false,
        ..Default::default()
    };
    let (mut dialog, mut notifications) =
        open_dialog(DialogMode::Create, config, creator, idle_detector());

    dialog.update(FieldUpdate::Name("my vm".to_string()))?;
    assert_eq!(dialog.submit().await?, SubmitOutcome::Created);
    assert!(!dialog.is_open());
    assert!(notifications.try_recv().is_err());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_carries_unattended_setup() -> MachinesResult<()> {
    let captured: Arc<Mutex<Option<CreateVmParams>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);
    let mut creator = MockVmCreator::new();
    creator.expect_create_vm().times(1).returning(move |params| {
        *sink.lock().unwrap() = Some(params);
        Ok(())
    });
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        creator,
        idle_detector(),
    );

    dialog.update(FieldUpdate::Name("workstation".to_string()))?;
    dialog.update(FieldUpdate::Os(Some("fedora40".to_string())))?;
    dialog.update(FieldUpdate::UnattendedInstallation(true))?;
    dialog.update(FieldUpdate::UserLogin(Some("alice".to_string())))?;
    dialog.update(FieldUpdate::UserPassword(Some("correct horse".to_string())))?;
    assert_eq!(dialog.submit().await?, SubmitOutcome::Created);

    let params = captured.lock().unwrap().take().unwrap();
    assert_eq!(params.connection_name, ConnectionScope::System);
    assert_eq!(params.source_type, SourceType::DownloadOs);
    assert_eq!(params.os, "fedora40");
    assert_eq!(params.memory_size, 2048);
    assert_eq!(params.storage_size, 20.0);
    assert_eq!(params.storage_pool, "NewVolume");
    assert!(params.unattended);
    assert!(params.start_vm);
    assert_eq!(params.profile.as_deref(), Some("jeos"));
    assert_eq!(params.user_login.as_deref(), Some("alice"));
    assert_eq!(params.root_password, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fast_failure_closes_and_notifies() -> MachinesResult<()> {
    let mut creator = MockVmCreator::new();
    creator
        .expect_create_vm()
        .times(1)
        .returning(|_| Err(MachinesError::Creation("pool is full".to_string())));
    let config = DialogConfig {
        require_os: false,
        ..Default::default()
    };
    let (mut dialog, mut notifications) =
        open_dialog(DialogMode::Create, config, creator, idle_detector());

    dialog.update(FieldUpdate::Name("vm1".to_string()))?;
    assert_eq!(
        dialog.submit().await?,
        SubmitOutcome::Failed("pool is full".to_string())
    );
    assert!(!dialog.is_open());

    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.title, "Creation of VM vm1 failed");
    assert_eq!(notification.detail, "pool is full");
    Ok(())
}

/// Takes ten seconds, then fails.
struct StalledCreator;

#[async_trait::async_trait]
impl VmCreator for StalledCreator {
    async fn create_vm(&self, _params: CreateVmParams) -> MachinesResult<()> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Err(MachinesError::Creation("install timed out".to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_creation_closes_after_grace_period() -> MachinesResult<()> {
    let (notifier, mut notifications) = Notifier::channel();
    let mut dialog = CreateVmDialog::builder()
        .host_context(host_context())
        .config(DialogConfig {
            require_os: false,
            ..Default::default()
        })
        .creator(Arc::new(StalledCreator))
        .detector(Arc::new(idle_detector()))
        .notifier(notifier)
        .open()?;

    dialog.update(FieldUpdate::Name("vm1".to_string()))?;
    let started = Instant::now();
    assert_eq!(dialog.submit().await?, SubmitOutcome::Pending);
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(!dialog.is_open());

    let notification = notifications.recv().await.unwrap();
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert_eq!(notification.title, "Creation of VM vm1 failed");
    assert_eq!(notification.detail, "install timed out");
    Ok(())
}
