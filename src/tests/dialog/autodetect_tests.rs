use super::open_dialog;
use crate::{
    DetectedOs, DetectionOutcome, DialogConfig, DialogMode, FieldUpdate, MachinesError,
    MachinesResult, Size, SizeUnit, SourceType,
    core::infrastructure::{os_detector::MockOsDetector, vm_creator::MockVmCreator},
};
use mockall::predicate::eq;
use std::time::Duration;
use tokio::time::Instant;

fn fedora_server() -> DetectedOs {
    DetectedOs {
        os: "fedora40".to_string(),
        media: Some("fedora40-server".to_string()),
    }
}

fn idle_creator() -> MockVmCreator {
    let mut creator = MockVmCreator::new();
    creator.expect_create_vm().never();
    creator
}

#[tokio::test(start_paused = true)]
async fn test_detected_os_is_applied() -> MachinesResult<()> {
    let mut detector = MockOsDetector::new();
    detector
        .expect_detect_os()
        .with(eq("/iso/Fedora-Server-40.iso".to_string()))
        .times(1)
        .returning(|_| Ok(Some(fedora_server())));
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog.update(FieldUpdate::SourceType(SourceType::LocalMedia))?;
    dialog.update(FieldUpdate::Source("/iso/Fedora-Server-40.iso".to_string()))?;
    let started = Instant::now();

    let outcome = dialog.next_detection().await?;
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert_eq!(outcome, Some(DetectionOutcome::Applied(fedora_server())));

    let draft = dialog.draft().unwrap();
    assert_eq!(draft.os(), Some("fedora40"));
    assert_eq!(draft.detected_media(), Some("fedora40-server"));
    assert_eq!(draft.memory(), Size::new(2, SizeUnit::GiB));
    assert!(dialog.unattended_supported());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_typing_only_detects_final_source() -> MachinesResult<()> {
    let mut detector = MockOsDetector::new();
    detector
        .expect_detect_os()
        .with(eq("http://mirror/f40.iso".to_string()))
        .times(1)
        .returning(|_| Ok(Some(fedora_server())));
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog.update(FieldUpdate::SourceType(SourceType::Url))?;
    for partial in ["http://", "http://mirror", "http://mirror/f40.iso"] {
        dialog.update(FieldUpdate::Source(partial.to_string()))?;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let outcome = dialog.next_detection().await?;
    assert!(matches!(outcome, Some(DetectionOutcome::Applied(_))));
    assert_eq!(dialog.next_detection().await?, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_clearing_source_cancels_detection() -> MachinesResult<()> {
    let mut detector = MockOsDetector::new();
    detector.expect_detect_os().never();
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog.update(FieldUpdate::SourceType(SourceType::LocalMedia))?;
    dialog.update(FieldUpdate::Source("/iso/f40.iso".to_string()))?;
    dialog.update(FieldUpdate::Source(String::new()))?;
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(dialog.next_detection().await?, None);
    assert_eq!(dialog.draft().unwrap().os(), None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_closing_cancels_detection() {
    let mut detector = MockOsDetector::new();
    detector.expect_detect_os().never();
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog
        .update(FieldUpdate::SourceType(SourceType::LocalMedia))
        .unwrap();
    dialog
        .update(FieldUpdate::Source("/iso/f40.iso".to_string()))
        .unwrap();
    dialog.close();
    tokio::time::sleep(Duration::from_secs(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_unknown_os_is_not_applied() -> MachinesResult<()> {
    let mut detector = MockOsDetector::new();
    detector.expect_detect_os().times(1).returning(|_| {
        Ok(Some(DetectedOs {
            os: "haiku-r1".to_string(),
            media: None,
        }))
    });
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog.update(FieldUpdate::SourceType(SourceType::LocalMedia))?;
    dialog.update(FieldUpdate::Source("/iso/haiku.iso".to_string()))?;
    assert_eq!(
        dialog.next_detection().await?,
        Some(DetectionOutcome::NotRecognised)
    );
    assert_eq!(dialog.draft().unwrap().os(), None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_detection_failure_leaves_draft_unchanged() -> MachinesResult<()> {
    let mut detector = MockOsDetector::new();
    detector
        .expect_detect_os()
        .times(1)
        .returning(|_| Err(MachinesError::Detection("cannot read medium".to_string())));
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog.update(FieldUpdate::SourceType(SourceType::LocalMedia))?;
    dialog.update(FieldUpdate::Os(Some("alpine3".to_string())))?;
    dialog.update(FieldUpdate::Source("/iso/broken.iso".to_string()))?;
    let before = dialog.draft().cloned();

    let outcome = dialog.next_detection().await?;
    assert_eq!(
        outcome,
        Some(DetectionOutcome::Failed(
            "OS detection failed: cannot read medium".to_string()
        ))
    );
    assert_eq!(dialog.draft().cloned(), before);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_live_media_does_not_offer_unattended() -> MachinesResult<()> {
    let mut detector = MockOsDetector::new();
    detector.expect_detect_os().times(1).returning(|_| {
        Ok(Some(DetectedOs {
            os: "fedora40".to_string(),
            media: Some("fedora40-live".to_string()),
        }))
    });
    let (mut dialog, _notifications) = open_dialog(
        DialogMode::Create,
        DialogConfig::default(),
        idle_creator(),
        detector,
    );

    dialog.update(FieldUpdate::SourceType(SourceType::LocalMedia))?;
    dialog.update(FieldUpdate::Source("/iso/Fedora-Live-40.iso".to_string()))?;
    dialog.next_detection().await?;
    assert_eq!(dialog.draft().unwrap().os(), Some("fedora40"));
    assert!(!dialog.unattended_supported());
    Ok(())
}
