use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Git platform hosting the team repositories
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitPlatform {
    /// AWS CodeCommit
    CodeCommit,
    /// GitHub (repository creation delegated to the CI/CD stack template)
    GitHub,
    /// GitLab (repository creation via the GitLab REST API)
    GitLab,
}

impl fmt::Display for GitPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitPlatform::CodeCommit => write!(f, "codecommit"),
            GitPlatform::GitHub => write!(f, "github"),
            GitPlatform::GitLab => write!(f, "gitlab"),
        }
    }
}

impl FromStr for GitPlatform {
    type Err = GitPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "codecommit" => Ok(GitPlatform::CodeCommit),
            "github" => Ok(GitPlatform::GitHub),
            "gitlab" => Ok(GitPlatform::GitLab),
            _ => Err(GitPlatformError::Unsupported(s.to_string())),
        }
    }
}

impl GitPlatform {
    /// Whether environment branches are created by this tool after provisioning.
    ///
    /// Hosted platforms manage branch topology themselves (or via a downstream
    /// process); only CodeCommit repositories get their `dev`/`test` branches
    /// cut here.
    pub fn manages_environment_branches(&self) -> bool {
        match self {
            GitPlatform::CodeCommit => true,
            GitPlatform::GitHub => false,
            GitPlatform::GitLab => false,
        }
    }

    /// Whether the repository resource is created through a remote HTTP API
    /// before the CI/CD stack is provisioned.
    pub fn uses_remote_api(&self) -> bool {
        match self {
            GitPlatform::CodeCommit => false,
            GitPlatform::GitHub => false,
            GitPlatform::GitLab => true,
        }
    }
}

/// Errors that can occur when working with platform selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitPlatformError {
    /// The specified platform is not supported
    Unsupported(String),
}

impl fmt::Display for GitPlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitPlatformError::Unsupported(platform) => {
                write!(
                    f,
                    "Unsupported git platform: '{}'. Supported platforms are: codecommit, github, gitlab",
                    platform
                )
            }
        }
    }
}

impl std::error::Error for GitPlatformError {}
