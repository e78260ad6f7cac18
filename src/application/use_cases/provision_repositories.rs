use crate::application::services::{
    BranchInitializer, StackProvisioner, StackWaiter, WaitBatches, MAX_WAIT_ATTEMPTS,
    POLL_INTERVAL_SECS,
};
use crate::domain::entities::manifest::DomainManifest;
use crate::domain::entities::team_repository::DEFAULT_REPOSITORY_PREFIX;
use crate::domain::value_objects::git_platform::GitPlatform;
use crate::infrastructure::parameters::{ParameterStore, ParameterStoreError};
use crate::infrastructure::stacks::{StackError, StackOperations};
use crate::infrastructure::vcs::{
    BranchError, BranchOperations, RemoteProjectApi, RemoteProjectOutcome, RemoteProjectRequest,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Parameter store names of the GitLab API secrets
pub const GITLAB_URL_PARAMETER: &str = "/SDLF/GitLab/Url";
pub const GITLAB_ACCESS_TOKEN_PARAMETER: &str = "/SDLF/GitLab/AccessToken";
pub const GITLAB_NAMESPACE_PARAMETER: &str = "/SDLF/GitLab/NamespaceId";

/// Errors surfaced by the provisioning use case
#[derive(Debug, Error)]
pub enum ProvisionRepositoriesError {
    #[error("Stack operation failed: {0}")]
    StackOperationFailed(#[from] StackError),

    #[error("Branch operation failed: {0}")]
    BranchOperationFailed(#[from] BranchError),

    #[error("Parameter store operation failed: {0}")]
    ParameterStoreFailed(#[from] ParameterStoreError),
}

/// Configuration of one provisioning invocation
#[derive(Debug, Clone)]
pub struct ProvisionRepositoriesConfig {
    /// Target git platform
    pub platform: GitPlatform,

    /// Template location resolvable by the infrastructure provider
    pub template_url: String,

    /// Execution role for stack operations
    pub role_arn: String,

    /// Prefix used to compute repository identity
    pub repository_prefix: String,

    /// Interval between convergence polls
    pub poll_interval: Duration,

    /// Number of polls before a stack is declared stuck
    pub max_wait_attempts: u32,
}

impl ProvisionRepositoriesConfig {
    pub fn new(
        platform: GitPlatform,
        template_url: impl Into<String>,
        role_arn: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            template_url: template_url.into(),
            role_arn: role_arn.into(),
            repository_prefix: DEFAULT_REPOSITORY_PREFIX.to_string(),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            max_wait_attempts: MAX_WAIT_ATTEMPTS,
        }
    }

    pub fn with_repository_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.repository_prefix = prefix.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_wait_attempts(mut self, max_wait_attempts: u32) -> Self {
        self.max_wait_attempts = max_wait_attempts;
        self
    }
}

/// External collaborators injected into one invocation.
///
/// Each handle lives for a single invocation, which keeps the use case
/// substitutable with test doubles.
pub struct ProvisioningServices {
    pub stacks: Arc<dyn StackOperations>,
    pub branches: Arc<dyn BranchOperations>,
    pub parameters: Arc<dyn ParameterStore>,
    pub remote_projects: Arc<dyn RemoteProjectApi>,
}

/// Summary of one provisioning invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionResult {
    /// Stacks provisioned, one per team
    pub stacks_provisioned: usize,
    /// Stacks that needed a convergence wait
    pub stacks_awaited: usize,
    /// Remote repositories accepted by the hosted platform
    pub remote_projects_created: usize,
    /// Remote repositories that most likely already existed
    pub remote_projects_existing: usize,
    /// Environment branches created
    pub branches_created: usize,
    /// Environment branches that already existed
    pub branches_existing: usize,
}

/// Provisions the team repositories of one domain.
///
/// Dispatches on the platform selector: CodeCommit gets stacks plus
/// environment branches, GitHub gets stacks only, GitLab gets a remote
/// repository per team via the platform API followed by stacks.
pub struct ProvisionRepositoriesUseCase {
    config: ProvisionRepositoriesConfig,
    services: ProvisioningServices,
}

impl ProvisionRepositoriesUseCase {
    pub fn new(config: ProvisionRepositoriesConfig, services: ProvisioningServices) -> Self {
        Self { config, services }
    }

    pub async fn execute(
        &self,
        manifest: &DomainManifest,
    ) -> Result<ProvisionResult, ProvisionRepositoriesError> {
        info!(
            domain = %manifest.domain,
            platform = %self.config.platform,
            teams = manifest.teams.len(),
            "provisioning team repositories"
        );

        match self.config.platform {
            GitPlatform::CodeCommit => self.provision_codecommit(manifest).await,
            GitPlatform::GitHub => self.provision_github(manifest).await,
            GitPlatform::GitLab => self.provision_gitlab(manifest).await,
        }
    }

    /// One stack per team, then a single wait pass over both batches
    async fn provision_stacks(
        &self,
        manifest: &DomainManifest,
        result: &mut ProvisionResult,
    ) -> Result<(), ProvisionRepositoriesError> {
        let provisioner = StackProvisioner::new(
            self.services.stacks.clone(),
            &self.config.template_url,
            &self.config.role_arn,
        );
        let waiter = StackWaiter::new(self.services.stacks.clone())
            .with_poll_interval(self.config.poll_interval)
            .with_max_attempts(self.config.max_wait_attempts);

        let mut batches = WaitBatches::new();
        for repository in manifest.team_repositories(&self.config.repository_prefix) {
            let stack = provisioner.provision(&repository).await?;
            batches.record(&stack);
            result.stacks_provisioned += 1;
        }

        result.stacks_awaited = batches.len();
        waiter.wait_all(&batches).await?;
        Ok(())
    }

    async fn provision_codecommit(
        &self,
        manifest: &DomainManifest,
    ) -> Result<ProvisionResult, ProvisionRepositoriesError> {
        let mut result = ProvisionResult::default();
        self.provision_stacks(manifest, &mut result).await?;

        // Repositories are guaranteed to exist once the waits resolved
        let initializer = BranchInitializer::new(self.services.branches.clone());
        for repository in manifest.team_repositories(&self.config.repository_prefix) {
            let report = initializer
                .ensure_environment_branches(&repository.repository_name())
                .await?;
            result.branches_created += report.created;
            result.branches_existing += report.existing;
        }

        Ok(result)
    }

    /// GitHub repositories are created by the stack template itself
    async fn provision_github(
        &self,
        manifest: &DomainManifest,
    ) -> Result<ProvisionResult, ProvisionRepositoriesError> {
        let mut result = ProvisionResult::default();
        self.provision_stacks(manifest, &mut result).await?;
        Ok(result)
    }

    async fn provision_gitlab(
        &self,
        manifest: &DomainManifest,
    ) -> Result<ProvisionResult, ProvisionRepositoriesError> {
        let mut result = ProvisionResult::default();

        for repository in manifest.team_repositories(&self.config.repository_prefix) {
            let repository_name = repository.repository_name();

            // Secrets are read per team so rotations take effect mid-batch
            let api_base_url = self
                .services
                .parameters
                .get_parameter(GITLAB_URL_PARAMETER, true)
                .await?;
            let access_token = self
                .services
                .parameters
                .get_parameter(GITLAB_ACCESS_TOKEN_PARAMETER, true)
                .await?;
            let namespace_id = self
                .services
                .parameters
                .get_parameter(GITLAB_NAMESPACE_PARAMETER, true)
                .await?;

            let request = RemoteProjectRequest {
                api_base_url,
                access_token,
                namespace_id,
                name: repository_name.clone(),
            };

            match self.services.remote_projects.create_project(&request).await {
                Ok(RemoteProjectOutcome::Created) => {
                    result.remote_projects_created += 1;
                }
                Ok(RemoteProjectOutcome::LikelyExists { status }) => {
                    warn!(
                        repository = %repository_name,
                        status,
                        "HTTP error creating repository; most likely it already exists"
                    );
                    result.remote_projects_existing += 1;
                }
                Err(e) => {
                    // Transport failures do not abort the remaining teams
                    error!(repository = %repository_name, error = %e, "repository creation failed");
                }
            }
        }

        self.provision_stacks(manifest, &mut result).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parameters::MockParameterStore;
    use crate::infrastructure::stacks::stack_interface::MockStackOperations;
    use crate::infrastructure::stacks::StackStatus;
    use crate::infrastructure::vcs::branch_interface::MockBranchOperations;
    use crate::infrastructure::vcs::remote_interface::MockRemoteProjectApi;
    use crate::infrastructure::vcs::RemoteProjectError;

    fn manifest() -> DomainManifest {
        DomainManifest::new("sales", vec!["analytics".to_string(), "ops".to_string()])
    }

    fn config(platform: GitPlatform) -> ProvisionRepositoriesConfig {
        ProvisionRepositoriesConfig::new(
            platform,
            "https://templates.example.com/team-repository.yaml",
            "arn:aws:iam::123456789012:role/cicd",
        )
        .with_poll_interval(Duration::from_millis(1))
        .with_max_wait_attempts(3)
    }

    fn stacks_that_create() -> MockStackOperations {
        let mut stacks = MockStackOperations::new();
        stacks.expect_create_stack().returning(|_| Ok(()));
        stacks
            .expect_stack_status()
            .returning(|_| Ok(StackStatus::CreateComplete));
        stacks
    }

    #[tokio::test]
    async fn test_github_flow_touches_only_the_stack_provider() {
        let mut branches = MockBranchOperations::new();
        branches.expect_branch_tip().never();
        branches.expect_create_branch().never();

        let mut parameters = MockParameterStore::new();
        parameters.expect_get_parameter().never();

        let mut remote_projects = MockRemoteProjectApi::new();
        remote_projects.expect_create_project().never();

        let services = ProvisioningServices {
            stacks: Arc::new(stacks_that_create()),
            branches: Arc::new(branches),
            parameters: Arc::new(parameters),
            remote_projects: Arc::new(remote_projects),
        };

        let result = ProvisionRepositoriesUseCase::new(config(GitPlatform::GitHub), services)
            .execute(&manifest())
            .await
            .unwrap();

        assert_eq!(result.stacks_provisioned, 2);
        assert_eq!(result.stacks_awaited, 2);
        assert_eq!(result.branches_created, 0);
        assert_eq!(result.remote_projects_created, 0);
    }

    #[tokio::test]
    async fn test_gitlab_flow_fetches_secrets_per_team() {
        let mut parameters = MockParameterStore::new();
        parameters
            .expect_get_parameter()
            .withf(|name, decrypt| name.starts_with("/SDLF/GitLab/") && *decrypt)
            .times(6)
            .returning(|name, _| Ok(format!("value-of-{}", name)));

        let mut remote_projects = MockRemoteProjectApi::new();
        remote_projects
            .expect_create_project()
            .withf(|req| {
                req.api_base_url == "value-of-/SDLF/GitLab/Url"
                    && req.name.starts_with("sdlf-main-sales-")
            })
            .times(2)
            .returning(|_| Ok(RemoteProjectOutcome::Created));

        let mut branches = MockBranchOperations::new();
        branches.expect_create_branch().never();

        let services = ProvisioningServices {
            stacks: Arc::new(stacks_that_create()),
            branches: Arc::new(branches),
            parameters: Arc::new(parameters),
            remote_projects: Arc::new(remote_projects),
        };

        let result = ProvisionRepositoriesUseCase::new(config(GitPlatform::GitLab), services)
            .execute(&manifest())
            .await
            .unwrap();

        assert_eq!(result.remote_projects_created, 2);
        assert_eq!(result.stacks_provisioned, 2);
    }

    #[tokio::test]
    async fn test_gitlab_transport_error_does_not_abort_remaining_teams() {
        let mut parameters = MockParameterStore::new();
        parameters
            .expect_get_parameter()
            .times(6)
            .returning(|_, _| Ok("value".to_string()));

        let mut remote_projects = MockRemoteProjectApi::new();
        let mut calls = 0;
        remote_projects
            .expect_create_project()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(RemoteProjectError::Transport {
                        url: "https://gitlab.example.com/api/v4/projects".to_string(),
                        message: "connection refused".to_string(),
                    })
                } else {
                    Ok(RemoteProjectOutcome::LikelyExists { status: 400 })
                }
            });

        let services = ProvisioningServices {
            stacks: Arc::new(stacks_that_create()),
            branches: Arc::new(MockBranchOperations::new()),
            parameters: Arc::new(parameters),
            remote_projects: Arc::new(remote_projects),
        };

        let result = ProvisionRepositoriesUseCase::new(config(GitPlatform::GitLab), services)
            .execute(&manifest())
            .await
            .unwrap();

        assert_eq!(result.remote_projects_created, 0);
        assert_eq!(result.remote_projects_existing, 1);
        assert_eq!(result.stacks_provisioned, 2);
    }
}
