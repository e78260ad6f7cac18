//! # rmgr - Team Repository Provisioner
//!
//! `rmgr` provisions source-control repositories and their CI/CD stacks for
//! teams onboarded into a data platform domain. It is invoked as one step of
//! a larger domain-onboarding workflow, reads a manifest naming the domain
//! and its teams, and drives one of three git platform backends.
//!
//! ## What it does
//!
//! - **CodeCommit**: one CI/CD stack per team, then `dev`/`test` environment
//!   branches cut from the tip of `main` in each team repository
//! - **GitHub**: one CI/CD stack per team (the stack template creates the
//!   repository itself)
//! - **GitLab**: one repository per team via the GitLab REST API, then one
//!   CI/CD stack per team
//!
//! All stack requests are issued sequentially; convergence waits are batched
//! by operation kind so the infrastructure provider can run them in parallel.
//!
//! ## Quick Start
//!
//! 1. Create a domain manifest (`manifest.yml`):
//!
//! ```yaml
//! domain: sales
//! teams:
//!   - analytics
//!   - ops
//! ```
//!
//! 2. Provision the repositories:
//!
//! ```bash
//! rmgr provision \
//!     --manifest manifest.yml \
//!     --platform codecommit \
//!     --template-url https://templates.example.com/team-repository.yaml \
//!     --role-arn arn:aws:iam::123456789012:role/cicd
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Core business logic and entities
//! - [`application`]: Use cases and business workflows
//! - [`infrastructure`]: External dependencies and I/O operations
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Shared utilities and error handling
//!
//! The external collaborators (infrastructure stacks, version control,
//! parameter store, hosted platform API) are capability traits injected into
//! the use case, so every flow can be exercised against test doubles.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rmgr::application::use_cases::provision_repositories::{
//!     ProvisionRepositoriesConfig, ProvisionRepositoriesUseCase, ProvisioningServices,
//! };
//! use rmgr::domain::entities::manifest::DomainManifest;
//! use rmgr::domain::value_objects::git_platform::GitPlatform;
//! use rmgr::infrastructure::parameters::SsmCli;
//! use rmgr::infrastructure::stacks::CloudFormationCli;
//! use rmgr::infrastructure::vcs::{CodeCommitCli, GitLabApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = DomainManifest::new("sales", vec!["analytics".to_string()]);
//!
//! let services = ProvisioningServices {
//!     stacks: Arc::new(CloudFormationCli::new()),
//!     branches: Arc::new(CodeCommitCli::new()),
//!     parameters: Arc::new(SsmCli::new()),
//!     remote_projects: Arc::new(GitLabApi::new()),
//! };
//!
//! let config = ProvisionRepositoriesConfig::new(
//!     GitPlatform::CodeCommit,
//!     "https://templates.example.com/team-repository.yaml",
//!     "arn:aws:iam::123456789012:role/cicd",
//! );
//!
//! let result = ProvisionRepositoriesUseCase::new(config, services)
//!     .execute(&manifest)
//!     .await?;
//!
//! println!("Provisioned {} stacks", result.stacks_provisioned);
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::RmgrError;
pub use crate::common::result::RmgrResult as Result;
