pub mod notifier;
pub mod os_detector;
pub mod vm_creator;
