use async_trait::async_trait;

/// Errors that can occur during branch operations
#[derive(Debug, thiserror::Error)]
pub enum BranchError {
    #[error("Branch {branch} already exists in repository {repository}")]
    BranchExists { repository: String, branch: String },

    #[error("Branch {branch} not found in repository {repository}")]
    BranchNotFound { repository: String, branch: String },

    #[error("Repository not found: {repository}")]
    RepositoryNotFound { repository: String },

    #[error("Unexpected provider response: {message}")]
    InvalidResponse { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
}

/// Capability contract of the cloud-native version-control provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BranchOperations: Send + Sync {
    /// Resolve the tip commit id of a branch
    async fn branch_tip(&self, repository: &str, branch: &str) -> Result<String, BranchError>;

    /// Create a branch pointing at the given commit id.
    ///
    /// Fails with [`BranchError::BranchExists`] when the branch name is
    /// already taken.
    async fn create_branch(
        &self,
        repository: &str,
        branch: &str,
        commit_id: &str,
    ) -> Result<(), BranchError>;
}
