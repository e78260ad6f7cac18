use crate::domain::entities::team_repository::TeamRepository;
use crate::infrastructure::stacks::{
    StackError, StackOperations, StackParameter, StackRequest, StackStatus,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Convergence check a provisioned stack still needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitKind {
    CreateComplete,
    UpdateComplete,
}

impl WaitKind {
    /// Terminal status this wait kind converges on
    pub fn expected_status(&self) -> StackStatus {
        match self {
            WaitKind::CreateComplete => StackStatus::CreateComplete,
            WaitKind::UpdateComplete => StackStatus::UpdateComplete,
        }
    }

    pub fn expected_status_name(&self) -> &'static str {
        match self {
            WaitKind::CreateComplete => "CREATE_COMPLETE",
            WaitKind::UpdateComplete => "UPDATE_COMPLETE",
        }
    }
}

/// Discriminated outcome of one provisioning attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A new stack was requested
    Created,
    /// An existing stack was updated
    Updated,
    /// The stack exists and has no drift; nothing to wait for
    NoChange,
}

impl ProvisionOutcome {
    /// Which convergence check the caller still owes, if any
    pub fn wait_kind(&self) -> Option<WaitKind> {
        match self {
            ProvisionOutcome::Created => Some(WaitKind::CreateComplete),
            ProvisionOutcome::Updated => Some(WaitKind::UpdateComplete),
            ProvisionOutcome::NoChange => None,
        }
    }
}

/// One provisioned team stack and how it was provisioned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedStack {
    pub stack_name: String,
    pub outcome: ProvisionOutcome,
}

/// Ensures the CI/CD stack of a team repository exists and is up to date.
///
/// Creation is attempted first; an already-existing stack falls back to an
/// update, and a driftless update is success with nothing to wait for. Any
/// other failure is fatal for that team's provisioning.
pub struct StackProvisioner {
    stacks: Arc<dyn StackOperations>,
    template_url: String,
    role_arn: String,
}

impl StackProvisioner {
    pub fn new(
        stacks: Arc<dyn StackOperations>,
        template_url: impl Into<String>,
        role_arn: impl Into<String>,
    ) -> Self {
        Self {
            stacks,
            template_url: template_url.into(),
            role_arn: role_arn.into(),
        }
    }

    pub async fn provision(
        &self,
        repository: &TeamRepository,
    ) -> Result<ProvisionedStack, StackError> {
        let request = self.build_request(repository);
        let stack_name = request.stack_name.clone();

        let outcome = match self.stacks.create_stack(&request).await {
            Ok(()) => {
                info!(stack = %stack_name, "stack creation requested");
                ProvisionOutcome::Created
            }
            Err(StackError::AlreadyExists { .. }) => {
                match self.stacks.update_stack(&request).await {
                    Ok(()) => {
                        info!(stack = %stack_name, "stack update requested");
                        ProvisionOutcome::Updated
                    }
                    Err(StackError::NoUpdates { .. }) => {
                        debug!(stack = %stack_name, "stack has no drift");
                        ProvisionOutcome::NoChange
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };

        Ok(ProvisionedStack {
            stack_name,
            outcome,
        })
    }

    fn build_request(&self, repository: &TeamRepository) -> StackRequest {
        StackRequest {
            stack_name: repository.stack_name(),
            template_url: self.template_url.clone(),
            parameters: repository
                .stack_parameters()
                .into_iter()
                .map(|(key, value)| StackParameter::new(key, value))
                .collect(),
            role_arn: self.role_arn.clone(),
            capabilities: vec!["CAPABILITY_AUTO_EXPAND".to_string()],
            tags: vec![("Framework".to_string(), "sdlf".to_string())],
        }
    }
}
