/// Default prefix for team repository names
pub const DEFAULT_REPOSITORY_PREFIX: &str = "sdlf-main-";

/// Branch the environment branches are cut from
pub const DEFAULT_BRANCH: &str = "main";

/// Long-lived environment branches expected by downstream pipelines
pub const ENVIRONMENT_BRANCHES: [&str; 2] = ["dev", "test"];

/// A team repository derived from one (domain, team) pair.
///
/// Carries the deterministic naming for both the repository itself and the
/// CI/CD stack that provisions it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRepository {
    domain: String,
    team: String,
    prefix: String,
}

impl TeamRepository {
    pub fn new(domain: impl Into<String>, team: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            team: team.into(),
            prefix: prefix.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    /// Repository identity: `{prefix}{domain}-{team}`
    pub fn repository_name(&self) -> String {
        format!("{}{}-{}", self.prefix, self.domain, self.team)
    }

    /// Name of the CI/CD stack provisioning this repository
    pub fn stack_name(&self) -> String {
        format!("sdlf-cicd-teams-{}-{}-repository", self.domain, self.team)
    }

    /// Template parameters identifying the (domain, team) pair
    pub fn stack_parameters(&self) -> Vec<(String, String)> {
        vec![
            ("pDomain".to_string(), self.domain.clone()),
            ("pTeamName".to_string(), self.team.clone()),
        ]
    }
}
