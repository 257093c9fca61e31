//! Everything the host console knows that the dialog only reads: the OS
//! catalog, per-scope listings and node limits.

use crate::core::domain::{
    error::{MachinesError, MachinesResult},
    model::{
        connection_scope::ConnectionScope,
        dialog_config::DialogConfig,
        network::{NetworkDevice, VirtualNetwork, initial_pxe_source},
        os_info::OsCatalog,
        storage_pool::StoragePool,
    },
};
use serde::{Deserialize, Serialize};

/// Listings of one connection scope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScopeResources {
    pub pools: Vec<StoragePool>,
    pub networks: Vec<VirtualNetwork>,
    pub network_devices: Vec<NetworkDevice>,
    /// Names of the VMs already defined in this scope.
    pub vm_names: Vec<String>,
}

/// Host-supplied, read-only inputs of a dialog session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostContext {
    pub os_catalog: OsCatalog,
    pub system: ScopeResources,
    pub session: ScopeResources,
    /// Memory of the node in bytes, if known.
    pub node_max_memory: Option<u64>,
    /// Whether the provisioning command can download OS images itself.
    pub download_os_supported: bool,
    /// Whether the console user is root.
    pub current_user_is_root: bool,
}

impl HostContext {
    /// Parses a context snapshot serialized by the host.
    ///
    /// # Errors
    /// Returns `MachinesError::Configuration` if the JSON is malformed.
    pub fn from_json(json: &str) -> MachinesResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| MachinesError::Configuration(format!("Invalid host context: {}", e)))
    }

    #[must_use]
    pub fn resources(&self, scope: ConnectionScope) -> &ScopeResources {
        match scope {
            ConnectionScope::System => &self.system,
            ConnectionScope::Session => &self.session,
        }
    }

    /// Looks a pool up by name in the given scope.
    #[must_use]
    pub fn pool(&self, scope: ConnectionScope, name: &str) -> Option<&StoragePool> {
        self.resources(scope)
            .pools
            .iter()
            .find(|pool| pool.name == name)
    }

    /// Free space of the pool new volumes land in, if that pool is known.
    #[must_use]
    pub fn available_space(&self, scope: ConnectionScope, config: &DialogConfig) -> Option<u64> {
        self.resources(scope)
            .pools
            .iter()
            .find(|pool| {
                let target = pool.target_path.trim_end_matches('/');
                match scope {
                    ConnectionScope::System => {
                        target == config.system_images_path.trim_end_matches('/')
                    }
                    ConnectionScope::Session => {
                        target.ends_with(config.session_images_suffix.trim_end_matches('/'))
                    }
                }
            })
            .map(|pool| pool.available)
    }

    /// Network boot needs the system scope and something to boot from.
    #[must_use]
    pub fn network_boot_supported(&self, scope: ConnectionScope) -> bool {
        let resources = self.resources(scope);
        scope == ConnectionScope::System
            && !(resources.networks.is_empty() && resources.network_devices.is_empty())
    }

    /// The network-boot source preselected for the given scope.
    #[must_use]
    pub fn initial_pxe_source(&self, scope: ConnectionScope) -> Option<String> {
        let resources = self.resources(scope);
        initial_pxe_source(&resources.networks, &resources.network_devices)
    }
}
