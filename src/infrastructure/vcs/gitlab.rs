use super::remote_interface::{
    RemoteProjectApi, RemoteProjectError, RemoteProjectOutcome, RemoteProjectRequest,
};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use url::Url;

/// GitLab REST API adapter.
///
/// A fresh HTTP client is built per request so that rotated tokens and URLs
/// picked up from the parameter store take effect team by team.
pub struct GitLabApi {
    accept_invalid_certs: bool,
}

/// Body of the `POST /api/v4/projects` call
#[derive(Debug, Serialize)]
struct CreateProjectBody<'a> {
    name: &'a str,
    description: &'a str,
    path: &'a str,
    namespace_id: &'a str,
    initialize_with_readme: bool,
}

impl GitLabApi {
    /// Create an adapter that verifies TLS certificates
    pub fn new() -> Self {
        Self {
            accept_invalid_certs: false,
        }
    }

    /// Skip TLS certificate verification on API calls.
    ///
    /// Needed for self-hosted instances serving self-signed certificates.
    /// This weakens transport security and must be opted into explicitly;
    /// it is never the default.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

impl Default for GitLabApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteProjectApi for GitLabApi {
    async fn create_project(
        &self,
        request: &RemoteProjectRequest,
    ) -> Result<RemoteProjectOutcome, RemoteProjectError> {
        let url = projects_endpoint(&request.api_base_url)?;

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| RemoteProjectError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let body = CreateProjectBody {
            name: &request.name,
            description: &request.name,
            path: &request.name,
            namespace_id: &request.namespace_id,
            initialize_with_readme: false,
        };

        let response = client
            .post(&url)
            .header("PRIVATE-TOKEN", &request.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteProjectError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            info!(project = %request.name, response = %response_body, "project created");
            Ok(RemoteProjectOutcome::Created)
        } else {
            Ok(RemoteProjectOutcome::LikelyExists {
                status: status.as_u16(),
            })
        }
    }
}

/// Build the projects endpoint from the configured base URL
fn projects_endpoint(base_url: &str) -> Result<String, RemoteProjectError> {
    Url::parse(base_url).map_err(|_| RemoteProjectError::InvalidUrl {
        url: base_url.to_string(),
    })?;

    Ok(format!(
        "{}/api/v4/projects",
        base_url.trim_end_matches('/')
    ))
}
