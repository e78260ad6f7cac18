use async_trait::async_trait;

/// A single template parameter of a stack request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackParameter {
    pub key: String,
    pub value: String,
    pub use_previous_value: bool,
}

impl StackParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            use_previous_value: false,
        }
    }
}

/// Arguments shared by stack create and update requests
#[derive(Debug, Clone)]
pub struct StackRequest {
    /// Deterministic stack name
    pub stack_name: String,
    /// Template location resolvable by the infrastructure provider
    pub template_url: String,
    /// Template parameters
    pub parameters: Vec<StackParameter>,
    /// Execution role passed through for stack operations
    pub role_arn: String,
    /// IAM capabilities acknowledged for this stack
    pub capabilities: Vec<String>,
    /// Resource tags applied to the stack
    pub tags: Vec<(String, String)>,
}

/// Last reported status of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackStatus {
    CreateInProgress,
    CreateComplete,
    UpdateInProgress,
    UpdateComplete,
    /// Rollback or `*_FAILED` status; the raw status string is preserved
    Failed(String),
    /// Any status this tool has no special handling for
    Other(String),
}

impl StackStatus {
    /// Parse a provider status string
    pub fn parse(status: &str) -> Self {
        match status {
            "CREATE_IN_PROGRESS" => StackStatus::CreateInProgress,
            "CREATE_COMPLETE" => StackStatus::CreateComplete,
            "UPDATE_IN_PROGRESS" | "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS" => {
                StackStatus::UpdateInProgress
            }
            "UPDATE_COMPLETE" => StackStatus::UpdateComplete,
            other if other.ends_with("_FAILED") || other.contains("ROLLBACK") => {
                StackStatus::Failed(other.to_string())
            }
            other => StackStatus::Other(other.to_string()),
        }
    }

    /// Whether this status means the last operation failed permanently
    pub fn is_failure(&self) -> bool {
        matches!(self, StackStatus::Failed(_))
    }
}

/// Errors that can occur during stack operations
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("Stack already exists: {stack_name}")]
    AlreadyExists { stack_name: String },

    #[error("No updates are to be performed on stack: {stack_name}")]
    NoUpdates { stack_name: String },

    #[error("Stack not found: {stack_name}")]
    NotFound { stack_name: String },

    #[error("Stack operation failed for {stack_name}: {message}")]
    OperationFailed { stack_name: String, message: String },

    #[error("Stack {stack_name} did not reach {expected} within {attempts} polls")]
    WaitTimeout {
        stack_name: String,
        expected: String,
        attempts: u32,
    },

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

impl StackError {
    pub fn operation_failed(stack_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OperationFailed {
            stack_name: stack_name.into(),
            message: message.into(),
        }
    }
}

/// Capability contract of the infrastructure provider owning the stacks.
///
/// Implementations issue the requests; convergence waiting is coordinated at
/// the application layer on top of [`StackOperations::stack_status`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StackOperations: Send + Sync {
    /// Request creation of a stack.
    ///
    /// Fails with [`StackError::AlreadyExists`] when a stack with the same
    /// name already exists.
    async fn create_stack(&self, request: &StackRequest) -> Result<(), StackError>;

    /// Request an update of an existing stack.
    ///
    /// Fails with [`StackError::NoUpdates`] when the template and parameters
    /// produce no drift.
    async fn update_stack(&self, request: &StackRequest) -> Result<(), StackError>;

    /// Read the current status of a stack
    async fn stack_status(&self, stack_name: &str) -> Result<StackStatus, StackError>;
}
