use super::branch_interface::{BranchError, BranchOperations};
use crate::infrastructure::aws_cli::{AwsCli, CliOutput};
use async_trait::async_trait;

/// CodeCommit adapter shelling out to the `aws` CLI
pub struct CodeCommitCli {
    cli: AwsCli,
}

impl Default for CodeCommitCli {
    fn default() -> Self {
        Self { cli: AwsCli::new() }
    }
}

impl CodeCommitCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            cli: AwsCli::with_executable(executable),
        }
    }
}

#[async_trait]
impl BranchOperations for CodeCommitCli {
    async fn branch_tip(&self, repository: &str, branch: &str) -> Result<String, BranchError> {
        let args = [
            "codecommit",
            "get-branch",
            "--repository-name",
            repository,
            "--branch-name",
            branch,
        ];

        let output = self.cli.run(&args).await?;
        if !output.success {
            return Err(classify_failure(repository, branch, &output));
        }

        parse_commit_id(&output.stdout)
    }

    async fn create_branch(
        &self,
        repository: &str,
        branch: &str,
        commit_id: &str,
    ) -> Result<(), BranchError> {
        let args = [
            "codecommit",
            "create-branch",
            "--repository-name",
            repository,
            "--branch-name",
            branch,
            "--commit-id",
            commit_id,
        ];

        let output = self.cli.run(&args).await?;
        if output.success {
            Ok(())
        } else {
            Err(classify_failure(repository, branch, &output))
        }
    }
}

/// Extract `branch.commitId` from a get-branch JSON response
fn parse_commit_id(stdout: &str) -> Result<String, BranchError> {
    let body: serde_json::Value =
        serde_json::from_str(stdout).map_err(|e| BranchError::InvalidResponse {
            message: format!("get-branch returned invalid JSON: {}", e),
        })?;

    body.get("branch")
        .and_then(|b| b.get("commitId"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| BranchError::InvalidResponse {
            message: "get-branch response is missing branch.commitId".to_string(),
        })
}

fn classify_failure(repository: &str, branch: &str, output: &CliOutput) -> BranchError {
    if output.stderr.contains("BranchNameExistsException") {
        BranchError::BranchExists {
            repository: repository.to_string(),
            branch: branch.to_string(),
        }
    } else if output.stderr.contains("BranchDoesNotExistException") {
        BranchError::BranchNotFound {
            repository: repository.to_string(),
            branch: branch.to_string(),
        }
    } else if output.stderr.contains("RepositoryDoesNotExistException") {
        BranchError::RepositoryNotFound {
            repository: repository.to_string(),
        }
    } else {
        BranchError::CommandFailed {
            command: output.command.clone(),
            exit_code: output.exit_code.unwrap_or(-1),
            stderr: output.stderr.clone(),
        }
    }
}
