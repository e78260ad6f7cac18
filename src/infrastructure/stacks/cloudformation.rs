use super::stack_interface::{StackError, StackOperations, StackRequest, StackStatus};
use crate::infrastructure::aws_cli::{AwsCli, CliOutput};
use async_trait::async_trait;
use tracing::info;

/// CloudFormation adapter shelling out to the `aws` CLI
pub struct CloudFormationCli {
    cli: AwsCli,
}

impl Default for CloudFormationCli {
    fn default() -> Self {
        Self { cli: AwsCli::new() }
    }
}

impl CloudFormationCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            cli: AwsCli::with_executable(executable),
        }
    }

    async fn submit(&self, action: &str, request: &StackRequest) -> Result<(), StackError> {
        let parameters = parameter_args(request);
        let tags = tag_args(request);

        let mut args = vec![
            "cloudformation",
            action,
            "--stack-name",
            request.stack_name.as_str(),
            "--template-url",
            request.template_url.as_str(),
            "--role-arn",
            request.role_arn.as_str(),
        ];
        if !request.parameters.is_empty() {
            args.push("--parameters");
            args.extend(parameters.iter().map(String::as_str));
        }
        if !request.capabilities.is_empty() {
            args.push("--capabilities");
            args.extend(request.capabilities.iter().map(String::as_str));
        }
        if !request.tags.is_empty() {
            args.push("--tags");
            args.extend(tags.iter().map(String::as_str));
        }

        let output = self.cli.run(&args).await?;
        if output.success {
            // Raw provider response, kept for audit
            info!(stack = %request.stack_name, response = %output.stdout, "stack request accepted");
            Ok(())
        } else {
            Err(classify_failure(&request.stack_name, &output))
        }
    }
}

#[async_trait]
impl StackOperations for CloudFormationCli {
    async fn create_stack(&self, request: &StackRequest) -> Result<(), StackError> {
        self.submit("create-stack", request).await
    }

    async fn update_stack(&self, request: &StackRequest) -> Result<(), StackError> {
        self.submit("update-stack", request).await
    }

    async fn stack_status(&self, stack_name: &str) -> Result<StackStatus, StackError> {
        let args = [
            "cloudformation",
            "describe-stacks",
            "--stack-name",
            stack_name,
            "--query",
            "Stacks[0].StackStatus",
            "--output",
            "text",
        ];

        let output = self.cli.run(&args).await?;
        if output.success {
            Ok(StackStatus::parse(&output.stdout))
        } else {
            Err(classify_failure(stack_name, &output))
        }
    }
}

/// Render the request parameters in the CLI's shorthand syntax
fn parameter_args(request: &StackRequest) -> Vec<String> {
    request
        .parameters
        .iter()
        .map(|p| {
            format!(
                "ParameterKey={},ParameterValue={},UsePreviousValue={}",
                p.key, p.value, p.use_previous_value
            )
        })
        .collect()
}

fn tag_args(request: &StackRequest) -> Vec<String> {
    request
        .tags
        .iter()
        .map(|(key, value)| format!("Key={},Value={}", key, value))
        .collect()
}

/// Map a failed CLI invocation onto the typed stack errors.
///
/// The CLI reports provider exceptions on stderr; the strings matched here
/// are the provider's stable exception identifiers.
fn classify_failure(stack_name: &str, output: &CliOutput) -> StackError {
    if output.stderr.contains("AlreadyExistsException") {
        StackError::AlreadyExists {
            stack_name: stack_name.to_string(),
        }
    } else if output.stderr.contains("No updates are to be performed") {
        StackError::NoUpdates {
            stack_name: stack_name.to_string(),
        }
    } else if output.stderr.contains("does not exist") {
        StackError::NotFound {
            stack_name: stack_name.to_string(),
        }
    } else {
        StackError::CommandFailed {
            command: output.command.clone(),
            exit_code: output.exit_code.unwrap_or(-1),
            stderr: output.stderr.clone(),
        }
    }
}
