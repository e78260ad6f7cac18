use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use crate::application::use_cases::provision_repositories::{
    ProvisionRepositoriesConfig, ProvisionRepositoriesUseCase, ProvisioningServices,
};
use crate::domain::entities::manifest::DomainManifest;
use crate::domain::value_objects::git_platform::GitPlatform;
use crate::infrastructure::parameters::SsmCli;
use crate::infrastructure::stacks::CloudFormationCli;
use crate::infrastructure::vcs::{CodeCommitCli, GitLabApi};

/// Handler for the provision command
pub struct ProvisionCommand {
    pub manifest: String,
    pub platform: String,
    pub template_url: String,
    pub role_arn: String,
    pub prefix: String,
    pub insecure_tls: bool,
    pub poll_interval: Option<u64>,
    pub max_attempts: Option<u32>,
    pub verbose: bool,
}

impl ProvisionCommand {
    pub async fn execute(&self) -> Result<()> {
        // Reject unsupported platforms before any provisioning side effect
        let platform = GitPlatform::from_str(&self.platform).map_err(|e| anyhow::anyhow!(e))?;

        let manifest = DomainManifest::from_file(Path::new(&self.manifest))
            .map_err(|e| anyhow::anyhow!("Failed to load manifest: {}", e))?;

        if self.insecure_tls {
            warn!("TLS certificate verification is disabled for hosted platform API calls");
        }

        let services = ProvisioningServices {
            stacks: Arc::new(CloudFormationCli::new()),
            branches: Arc::new(CodeCommitCli::new()),
            parameters: Arc::new(SsmCli::new()),
            remote_projects: Arc::new(
                GitLabApi::new().with_accept_invalid_certs(self.insecure_tls),
            ),
        };

        let mut config =
            ProvisionRepositoriesConfig::new(platform, &self.template_url, &self.role_arn)
                .with_repository_prefix(&self.prefix);
        if let Some(secs) = self.poll_interval {
            config = config.with_poll_interval(std::time::Duration::from_secs(secs));
        }
        if let Some(attempts) = self.max_attempts {
            config = config.with_max_wait_attempts(attempts);
        }

        let use_case = ProvisionRepositoriesUseCase::new(config, services);

        println!(
            "{} Provisioning repositories for domain '{}' ({} teams)...",
            "::".blue().bold(),
            manifest.domain,
            manifest.teams.len()
        );

        match use_case.execute(&manifest).await {
            Ok(result) => {
                println!("{} Provisioning completed!", "✓".green().bold());
                if self.verbose {
                    println!("  Stacks provisioned: {}", result.stacks_provisioned);
                    println!("  Stacks awaited: {}", result.stacks_awaited);
                    if result.remote_projects_created + result.remote_projects_existing > 0 {
                        println!(
                            "  Remote repositories created: {}",
                            result.remote_projects_created
                        );
                        println!(
                            "  Remote repositories already present: {}",
                            result.remote_projects_existing
                        );
                    }
                    if result.branches_created + result.branches_existing > 0 {
                        println!("  Branches created: {}", result.branches_created);
                        println!("  Branches already present: {}", result.branches_existing);
                    }
                }
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("Failed to provision repositories: {}", e)),
        }
    }
}
