//! Network listings used for network-boot (PXE) sources.

use serde::{Deserialize, Serialize};

/// A libvirt virtual network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VirtualNetwork {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// A host network interface usable as a direct (macvtap) attachment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkDevice {
    pub interface: String,
    /// Whether the link is up.
    #[serde(default)]
    pub active: bool,
}

/// One selectable network-boot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PxeSource {
    /// Value handed to the provisioning command as the source.
    pub value: String,
    /// Whether the source can currently be used.
    pub usable: bool,
}

/// Lists the network-boot sources: virtual networks first, then host
/// interfaces.
pub fn pxe_sources(networks: &[VirtualNetwork], devices: &[NetworkDevice]) -> Vec<PxeSource> {
    let networks = networks.iter().map(|network| PxeSource {
        value: format!("network={}", network.name),
        usable: network.active,
    });
    let devices = devices.iter().map(|device| PxeSource {
        value: format!("type=direct,source={}", device.interface),
        usable: device.active,
    });
    networks.chain(devices).collect()
}

/// The source preselected when switching to network boot.
///
/// An active network named `default` wins, then the first usable source.
/// When nothing is usable the first listed source is still chosen, so the
/// field is never left empty while sources exist.
pub fn initial_pxe_source(networks: &[VirtualNetwork], devices: &[NetworkDevice]) -> Option<String> {
    if let Some(network) = networks
        .iter()
        .find(|network| network.name == "default" && network.active)
    {
        return Some(format!("network={}", network.name));
    }
    let sources = pxe_sources(networks, devices);
    let position = sources.iter().position(|source| source.usable).unwrap_or(0);
    sources.into_iter().nth(position).map(|source| source.value)
}
