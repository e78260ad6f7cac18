pub mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::exit;

use commands::provision::ProvisionCommand;

/// rmgr - Provision team git repositories for data platform domains
#[derive(Parser)]
#[command(name = "rmgr")]
#[command(about = "Provision team git repositories and CI/CD stacks for data platform domains")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision the team repositories of a domain
    Provision {
        /// Path to the domain manifest file (YAML or JSON)
        #[arg(short, long)]
        manifest: String,

        /// Git platform hosting the repositories (codecommit, github, gitlab)
        #[arg(short, long)]
        platform: String,

        /// Template URL for the team repository CI/CD stack
        #[arg(short, long)]
        template_url: String,

        /// Execution role ARN passed through for stack operations
        #[arg(short, long)]
        role_arn: String,

        /// Repository name prefix
        #[arg(long, default_value = "sdlf-main-")]
        prefix: String,

        /// Skip TLS certificate verification on hosted platform API calls.
        /// Only for self-hosted instances with self-signed certificates.
        #[arg(long)]
        insecure_tls: bool,

        /// Seconds between stack convergence polls
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Number of polls before a stack is declared stuck
        #[arg(long)]
        max_attempts: Option<u32>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        // Set up colored output
        if !self.cli.no_color {
            colored::control::set_override(true);
        } else {
            colored::control::set_override(false);
        }

        // Handle the command
        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Provision {
                manifest,
                platform,
                template_url,
                role_arn,
                prefix,
                insecure_tls,
                poll_interval,
                max_attempts,
            } => {
                let command = ProvisionCommand {
                    manifest: manifest.clone(),
                    platform: platform.clone(),
                    template_url: template_url.clone(),
                    role_arn: role_arn.clone(),
                    prefix: prefix.clone(),
                    insecure_tls: *insecure_tls,
                    poll_interval: *poll_interval,
                    max_attempts: *max_attempts,
                    verbose: self.cli.verbose,
                };
                command.execute().await
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
