/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Stack operations (CloudFormation via the aws CLI)
/// - Branch operations (CodeCommit via the aws CLI)
/// - Hosted platform APIs (GitLab REST)
/// - Secure parameter store (SSM via the aws CLI)
pub mod aws_cli;
pub mod parameters;
pub mod stacks;
pub mod vcs;

// Re-export commonly used types
pub use parameters::{ParameterStore, ParameterStoreError, SsmCli};
pub use stacks::{
    CloudFormationCli, StackError, StackOperations, StackParameter, StackRequest, StackStatus,
};
pub use vcs::{
    BranchError, BranchOperations, CodeCommitCli, GitLabApi, RemoteProjectApi, RemoteProjectError,
    RemoteProjectOutcome, RemoteProjectRequest,
};
