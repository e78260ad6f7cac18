use std::process::Stdio;
use tokio::process::Command;

/// Outcome of one AWS CLI invocation.
#[derive(Debug, Clone)]
pub struct CliOutput {
    /// Full command line, for error reporting
    pub command: String,
    /// Whether the process exited successfully
    pub success: bool,
    /// Process exit code, if any
    pub exit_code: Option<i32>,
    /// Captured standard output, trimmed
    pub stdout: String,
    /// Captured standard error, trimmed
    pub stderr: String,
}

/// Thin runner around the `aws` executable.
///
/// All AWS-facing collaborators (CloudFormation, CodeCommit, SSM) shell out
/// through this runner; each adapter classifies the stderr of failed
/// invocations into its own typed error.
pub struct AwsCli {
    executable: String,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self {
            executable: "aws".to_string(),
        }
    }
}

impl AwsCli {
    /// Create a new runner using the `aws` executable from PATH
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new runner with a custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Check if the aws executable is available
    pub async fn check_availability(&self) -> std::io::Result<bool> {
        let output = Command::new(&self.executable)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;
        Ok(output.status.success())
    }

    /// Run an aws subcommand and capture its output
    pub async fn run(&self, args: &[&str]) -> std::io::Result<CliOutput> {
        let output = Command::new(&self.executable)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(CliOutput {
            command: format!("{} {}", self.executable, args.join(" ")),
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
