use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The virtualization context operations are aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionScope {
    /// The system-wide context (`qemu:///system`).
    #[default]
    System,
    /// The per-user session context (`qemu:///session`).
    Session,
}

impl ConnectionScope {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionScope::System => "system",
            ConnectionScope::Session => "session",
        }
    }
}

impl Display for ConnectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
