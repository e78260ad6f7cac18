//! Version-control provider interfaces and adapters.

pub mod branch_interface;
pub mod codecommit;
pub mod gitlab;
pub mod remote_interface;

pub use branch_interface::{BranchError, BranchOperations};
pub use codecommit::CodeCommitCli;
pub use gitlab::GitLabApi;
pub use remote_interface::{
    RemoteProjectApi, RemoteProjectError, RemoteProjectOutcome, RemoteProjectRequest,
};
