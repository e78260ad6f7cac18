use super::team_repository::TeamRepository;
use crate::common::error::RmgrError;
use crate::common::result::RmgrResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Domain onboarding manifest.
///
/// Describes one data platform domain and the teams being onboarded into it.
/// The manifest is handed to this tool by the surrounding onboarding workflow
/// and is treated as read-only input; team names are assumed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainManifest {
    /// Domain identifier (e.g. "sales")
    pub domain: String,

    /// Ordered list of team names within the domain
    pub teams: Vec<String>,
}

impl DomainManifest {
    /// Create a new manifest
    pub fn new(domain: impl Into<String>, teams: Vec<String>) -> Self {
        Self {
            domain: domain.into(),
            teams,
        }
    }

    /// Parse a manifest from a YAML document
    pub fn from_yaml_str(content: &str) -> RmgrResult<Self> {
        let manifest: DomainManifest = serde_yaml::from_str(content)?;
        Ok(manifest)
    }

    /// Parse a manifest from a JSON document
    pub fn from_json_str(content: &str) -> RmgrResult<Self> {
        let manifest: DomainManifest = serde_json::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest from a file, choosing the format by extension.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: &Path) -> RmgrResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RmgrError::manifest_error_with_source(
                format!("Failed to read manifest file: {}", path.display()),
                Some(path.to_path_buf()),
                e,
            )
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Derive the team repositories of this domain for the given name prefix
    pub fn team_repositories(&self, prefix: &str) -> Vec<TeamRepository> {
        self.teams
            .iter()
            .map(|team| TeamRepository::new(&self.domain, team, prefix))
            .collect()
    }
}
