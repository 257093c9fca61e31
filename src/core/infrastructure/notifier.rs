//! Out-of-band channel for results that arrive after the dialog closed.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::warn;

/// A message for the console's notification area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub detail: String,
}

impl Notification {
    /// Notification for a VM whose creation failed.
    pub fn creation_failed(vm_name: &str, detail: impl Into<String>) -> Self {
        Self {
            title: format!("Creation of VM {vm_name} failed"),
            detail: detail.into(),
        }
    }
}

/// Sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<Notification>,
}

impl Notifier {
    /// Creates a notifier and the receiver the host UI drains.
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    /// Delivers a notification. A host that stopped listening only costs a
    /// log line.
    pub fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!(title = %e.0.title, "Notification dropped, no receiver");
        }
    }
}
