//! Secure parameter store interface and adapter.

use crate::infrastructure::aws_cli::{AwsCli, CliOutput};
use async_trait::async_trait;

/// Errors that can occur while reading parameters
#[derive(Debug, thiserror::Error)]
pub enum ParameterStoreError {
    #[error("Parameter not found: {name}")]
    NotFound { name: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
}

/// Capability contract of the secure parameter store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Read a parameter value, decrypting it when requested
    async fn get_parameter(&self, name: &str, decrypt: bool) -> Result<String, ParameterStoreError>;
}

/// SSM parameter store adapter shelling out to the `aws` CLI
pub struct SsmCli {
    cli: AwsCli,
}

impl Default for SsmCli {
    fn default() -> Self {
        Self { cli: AwsCli::new() }
    }
}

impl SsmCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            cli: AwsCli::with_executable(executable),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmCli {
    async fn get_parameter(&self, name: &str, decrypt: bool) -> Result<String, ParameterStoreError> {
        let mut args = vec!["ssm", "get-parameter", "--name", name];
        if decrypt {
            args.push("--with-decryption");
        }
        args.extend(["--query", "Parameter.Value", "--output", "text"]);

        let output = self.cli.run(&args).await?;
        if output.success {
            Ok(output.stdout)
        } else {
            Err(classify_failure(name, &output))
        }
    }
}

fn classify_failure(name: &str, output: &CliOutput) -> ParameterStoreError {
    if output.stderr.contains("ParameterNotFound") {
        ParameterStoreError::NotFound {
            name: name.to_string(),
        }
    } else {
        ParameterStoreError::CommandFailed {
            command: output.command.clone(),
            exit_code: output.exit_code.unwrap_or(-1),
            stderr: output.stderr.clone(),
        }
    }
}
