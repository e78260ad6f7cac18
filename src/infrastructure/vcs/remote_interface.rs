use async_trait::async_trait;

/// One remote repository creation request.
///
/// Carries the secrets alongside the payload: callers fetch them from the
/// parameter store per request, so nothing is cached across teams.
#[derive(Debug, Clone)]
pub struct RemoteProjectRequest {
    /// Base URL of the platform API (e.g. `https://gitlab.example.com/`)
    pub api_base_url: String,
    /// Bearer-style private token
    pub access_token: String,
    /// Target namespace the project is created under
    pub namespace_id: String,
    /// Project name; also used as description and path
    pub name: String,
}

/// Outcome of a remote project creation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteProjectOutcome {
    /// The platform accepted the creation request
    Created,
    /// The platform returned a non-2xx status; the project most likely
    /// already exists
    LikelyExists { status: u16 },
}

/// Errors that can occur while talking to the platform API
#[derive(Debug, thiserror::Error)]
pub enum RemoteProjectError {
    #[error("Invalid API URL: {url}")]
    InvalidUrl { url: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// Capability contract of a hosted git platform's repository API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteProjectApi: Send + Sync {
    /// Create a remote repository resource.
    ///
    /// A non-2xx response is not an error: it maps to
    /// [`RemoteProjectOutcome::LikelyExists`]. Only transport failures are
    /// reported as errors.
    async fn create_project(
        &self,
        request: &RemoteProjectRequest,
    ) -> Result<RemoteProjectOutcome, RemoteProjectError>;
}
