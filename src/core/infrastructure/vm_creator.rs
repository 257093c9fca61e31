//! Seam to the external VM provisioning command.

use crate::core::domain::{error::MachinesResult, model::create_vm_params::CreateVmParams};
use async_trait::async_trait;

/// Defines (and optionally starts) a VM from a frozen parameter snapshot.
///
/// Implementations wrap whatever actually provisions the VM (typically a
/// `virt-install` invocation). A failure carries the command's human-readable
/// error text in `MachinesError::Creation`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VmCreator: Send + Sync {
    async fn create_vm(&self, params: CreateVmParams) -> MachinesResult<()>;
}
