use crate::domain::entities::team_repository::{DEFAULT_BRANCH, ENVIRONMENT_BRANCHES};
use crate::infrastructure::vcs::{BranchError, BranchOperations};
use std::sync::Arc;
use tracing::info;

/// What happened to the environment branches of one repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchReport {
    pub created: usize,
    pub existing: usize,
}

/// Ensures the `dev` and `test` environment branches of a team repository
/// exist, pointing at the current tip of `main`.
///
/// Must run after the repository's stack has converged; a pre-existing branch
/// is success, any other failure is propagated.
pub struct BranchInitializer {
    branches: Arc<dyn BranchOperations>,
}

impl BranchInitializer {
    pub fn new(branches: Arc<dyn BranchOperations>) -> Self {
        Self { branches }
    }

    pub async fn ensure_environment_branches(
        &self,
        repository_name: &str,
    ) -> Result<BranchReport, BranchError> {
        let commit_id = self
            .branches
            .branch_tip(repository_name, DEFAULT_BRANCH)
            .await?;

        let mut report = BranchReport::default();
        for env_branch in ENVIRONMENT_BRANCHES {
            match self
                .branches
                .create_branch(repository_name, env_branch, &commit_id)
                .await
            {
                Ok(()) => {
                    info!(
                        branch = env_branch,
                        repository = repository_name,
                        "branch created"
                    );
                    report.created += 1;
                }
                Err(BranchError::BranchExists { .. }) => {
                    info!(
                        branch = env_branch,
                        repository = repository_name,
                        "branch already created"
                    );
                    report.existing += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::vcs::branch_interface::MockBranchOperations;

    #[tokio::test]
    async fn test_creates_both_environment_branches_at_main_tip() {
        let mut branches = MockBranchOperations::new();
        branches
            .expect_branch_tip()
            .withf(|repo, branch| repo == "sdlf-main-sales-analytics" && branch == "main")
            .times(1)
            .returning(|_, _| Ok("abc123".to_string()));
        branches
            .expect_create_branch()
            .withf(|repo, branch, commit| {
                repo == "sdlf-main-sales-analytics"
                    && (branch == "dev" || branch == "test")
                    && commit == "abc123"
            })
            .times(2)
            .returning(|_, _, _| Ok(()));

        let report = BranchInitializer::new(Arc::new(branches))
            .ensure_environment_branches("sdlf-main-sales-analytics")
            .await
            .unwrap();

        assert_eq!(report, BranchReport { created: 2, existing: 0 });
    }

    #[tokio::test]
    async fn test_existing_branch_is_not_an_error() {
        let mut branches = MockBranchOperations::new();
        branches
            .expect_branch_tip()
            .times(1)
            .returning(|_, _| Ok("abc123".to_string()));
        branches
            .expect_create_branch()
            .times(2)
            .returning(|repo, branch, _| {
                Err(BranchError::BranchExists {
                    repository: repo.to_string(),
                    branch: branch.to_string(),
                })
            });

        let report = BranchInitializer::new(Arc::new(branches))
            .ensure_environment_branches("sdlf-main-sales-analytics")
            .await
            .unwrap();

        assert_eq!(report, BranchReport { created: 0, existing: 2 });
    }

    #[tokio::test]
    async fn test_other_branch_failure_is_propagated() {
        let mut branches = MockBranchOperations::new();
        branches
            .expect_branch_tip()
            .times(1)
            .returning(|_, _| Ok("abc123".to_string()));
        branches
            .expect_create_branch()
            .times(1)
            .returning(|repo, _, _| {
                Err(BranchError::RepositoryNotFound {
                    repository: repo.to_string(),
                })
            });

        let result = BranchInitializer::new(Arc::new(branches))
            .ensure_environment_branches("sdlf-main-sales-analytics")
            .await;

        assert!(matches!(
            result,
            Err(BranchError::RepositoryNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_default_branch_is_propagated() {
        let mut branches = MockBranchOperations::new();
        branches.expect_branch_tip().times(1).returning(|repo, branch| {
            Err(BranchError::BranchNotFound {
                repository: repo.to_string(),
                branch: branch.to_string(),
            })
        });
        branches.expect_create_branch().never();

        let result = BranchInitializer::new(Arc::new(branches))
            .ensure_environment_branches("sdlf-main-sales-analytics")
            .await;

        assert!(matches!(result, Err(BranchError::BranchNotFound { .. })));
    }
}
