use leeca_machines::{
    CreateVmDialog, CreateVmParams, DetectedOs, DialogMode, FieldUpdate, HostContext,
    MachinesResult, Notifier, OsDetector, SourceType, SubmitOutcome, VmCreator,
    password_strength,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Prints the snapshot instead of running virt-install.
struct PrintingCreator;

#[async_trait::async_trait]
impl VmCreator for PrintingCreator {
    async fn create_vm(&self, params: CreateVmParams) -> MachinesResult<()> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let json = serde_json::to_string_pretty(&params)
            .map_err(|e| leeca_machines::MachinesError::Creation(e.to_string()))?;
        println!("create-vm {json}");
        Ok(())
    }
}

/// Recognises Fedora images by file name.
struct FileNameDetector;

#[async_trait::async_trait]
impl OsDetector for FileNameDetector {
    async fn detect_os(&self, source: String) -> MachinesResult<Option<DetectedOs>> {
        Ok(source.contains("Fedora-Server-40").then(|| DetectedOs {
            os: "fedora40".to_string(),
            media: Some("fedora40-server".to_string()),
        }))
    }
}

const HOST: &str = r#"{
    "osCatalog": [
        {
            "id": "http://fedoraproject.org/fedora/40",
            "shortId": "fedora40",
            "name": "Fedora Linux 40",
            "minimumResources": { "ram": 1073741824, "storage": 10737418240 },
            "recommendedResources": { "ram": 2147483648, "storage": 21474836480 },
            "unattendedInstallable": true,
            "profiles": ["desktop", "jeos"],
            "medias": { "fedora40-server": { "unattendedInstallable": true } }
        }
    ],
    "system": {
        "pools": [
            { "name": "default", "targetPath": "/var/lib/libvirt/images", "available": 53687091200 }
        ],
        "networks": [{ "name": "default", "active": true }],
        "vmNames": ["web01"]
    },
    "nodeMaxMemory": 17179869184
}"#;

#[tokio::main]
async fn main() -> MachinesResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leeca_machines=debug")),
        )
        .with_target(false)
        .init();

    let (notifier, mut notifications) = Notifier::channel();
    let mut dialog = CreateVmDialog::builder()
        .host_context(HostContext::from_json(HOST)?)
        .creator(Arc::new(PrintingCreator))
        .detector(Arc::new(FileNameDetector))
        .notifier(notifier)
        .mode(DialogMode::Create)
        .open()?;

    dialog.update(FieldUpdate::Name("web01".to_string()))?;
    dialog.update(FieldUpdate::SourceType(SourceType::LocalMedia))?;
    dialog.update(FieldUpdate::Source(
        "/var/lib/libvirt/images/Fedora-Server-40.iso".to_string(),
    ))?;
    if let Some(outcome) = dialog.next_detection().await? {
        println!("auto-detection: {outcome:?}");
    }

    if let SubmitOutcome::Invalid(report) = dialog.submit().await? {
        for (section, reason) in report.iter() {
            println!("{section}: {reason}");
        }
    }

    dialog.update(FieldUpdate::Name("web 02".to_string()))?;
    if dialog.unattended_supported() {
        let password = "tr0ub4dor&3-horse";
        if let Some(quality) = password_strength(password) {
            println!("root password strength: {:?}", quality.strength);
        }
        dialog.update(FieldUpdate::UnattendedInstallation(true))?;
        dialog.update(FieldUpdate::RootPassword(Some(password.to_string())))?;
    }

    let outcome = dialog.submit().await?;
    println!("submit: {outcome:?}");

    while let Ok(notification) = notifications.try_recv() {
        println!("{}: {}", notification.title, notification.detail);
    }
    Ok(())
}
