mod autodetect_tests;
mod lifecycle_tests;
mod submit_tests;

use crate::{
    CreateVmDialog, DialogConfig, DialogMode, Notification, Notifier,
    core::infrastructure::{os_detector::MockOsDetector, vm_creator::MockVmCreator},
    tests::fixtures::host_context,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Opens a dialog on the fixture host with the given collaborators.
fn open_dialog(
    mode: DialogMode,
    config: DialogConfig,
    creator: MockVmCreator,
    detector: MockOsDetector,
) -> (CreateVmDialog, UnboundedReceiver<Notification>) {
    let (notifier, notifications) = Notifier::channel();
    let dialog = CreateVmDialog::builder()
        .host_context(host_context())
        .config(config)
        .creator(Arc::new(creator))
        .detector(Arc::new(detector))
        .notifier(notifier)
        .mode(mode)
        .open()
        .unwrap();
    (dialog, notifications)
}

/// A dialog whose collaborators must not be called.
fn open_idle_dialog(mode: DialogMode) -> (CreateVmDialog, UnboundedReceiver<Notification>) {
    let mut creator = MockVmCreator::new();
    creator.expect_create_vm().never();
    let mut detector = MockOsDetector::new();
    detector.expect_detect_os().never();
    open_dialog(mode, DialogConfig::default(), creator, detector)
}
