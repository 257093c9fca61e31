use crate::{
    core::{
        domain::{
            error::{MachinesError, MachinesResult},
            model::create_vm_params::CreateVmParams,
        },
        infrastructure::{
            notifier::{Notification, Notifier},
            vm_creator::VmCreator,
        },
    },
    dialog::application::response::submit_outcome::SubmitOutcome,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{info, warn};

/// Hands a frozen snapshot to the creation collaborator with a bounded wait.
///
/// The creation call is never cancelled: when it outlives the grace period
/// its result is still observed, and a failure goes to the notifier.
pub struct SubmitService {
    creator: Arc<dyn VmCreator>,
    notifier: Notifier,
    grace_period: Duration,
}

impl SubmitService {
    pub fn new(creator: Arc<dyn VmCreator>, notifier: Notifier, grace_period: Duration) -> Self {
        Self {
            creator,
            notifier,
            grace_period,
        }
    }

    pub async fn submit(&self, params: CreateVmParams) -> SubmitOutcome {
        let vm_name = params.vm_name.clone();
        info!(
            vm = %vm_name,
            connection = %params.connection_name,
            source_type = %params.source_type,
            os = %params.os,
            "Submitting VM creation"
        );

        let creator = Arc::clone(&self.creator);
        let mut creation = tokio::spawn(async move { creator.create_vm(params).await });

        let settled = tokio::time::timeout(self.grace_period, &mut creation).await;
        match settled {
            Ok(joined) => Self::settle(&self.notifier, &vm_name, joined),
            Err(_) => {
                info!(vm = %vm_name, "VM creation still running, closing dialog");
                let notifier = self.notifier.clone();
                tokio::spawn(async move {
                    Self::settle(&notifier, &vm_name, creation.await);
                });
                SubmitOutcome::Pending
            }
        }
    }

    fn settle(
        notifier: &Notifier,
        vm_name: &str,
        joined: Result<MachinesResult<()>, JoinError>,
    ) -> SubmitOutcome {
        let result = joined
            .map_err(|e| MachinesError::Creation(e.to_string()))
            .and_then(|created| created);
        match result {
            Ok(()) => {
                info!(vm = %vm_name, "VM created");
                SubmitOutcome::Created
            }
            Err(e) => {
                let detail = match e {
                    MachinesError::Creation(detail) => detail,
                    other => other.to_string(),
                };
                warn!(vm = %vm_name, error = %detail, "VM creation failed");
                notifier.notify(Notification::creation_failed(vm_name, detail.clone()));
                SubmitOutcome::Failed(detail)
            }
        }
    }
}
