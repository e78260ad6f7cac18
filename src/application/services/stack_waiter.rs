use super::stack_provisioner::{ProvisionedStack, WaitKind};
use crate::infrastructure::stacks::{StackError, StackOperations};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default polling interval between convergence checks, in seconds
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Default number of polls before a stack is declared stuck
pub const MAX_WAIT_ATTEMPTS: u32 = 10;

/// Stacks grouped by the convergence check they still need.
///
/// Requests are issued sequentially across teams; batching the waits lets the
/// provider run the operations in parallel and blocks this tool only once per
/// batch instead of once per team.
#[derive(Debug, Default)]
pub struct WaitBatches {
    create_complete: Vec<String>,
    update_complete: Vec<String>,
}

impl WaitBatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a provisioned stack; stacks with no drift are not waited on
    pub fn record(&mut self, stack: &ProvisionedStack) {
        match stack.outcome.wait_kind() {
            Some(WaitKind::CreateComplete) => {
                self.create_complete.push(stack.stack_name.clone());
            }
            Some(WaitKind::UpdateComplete) => {
                self.update_complete.push(stack.stack_name.clone());
            }
            None => {}
        }
    }

    pub fn batch(&self, kind: WaitKind) -> &[String] {
        match kind {
            WaitKind::CreateComplete => &self.create_complete,
            WaitKind::UpdateComplete => &self.update_complete,
        }
    }

    pub fn len(&self) -> usize {
        self.create_complete.len() + self.update_complete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Blocks until every recorded stack reaches its terminal success state.
pub struct StackWaiter {
    stacks: Arc<dyn StackOperations>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl StackWaiter {
    pub fn new(stacks: Arc<dyn StackOperations>) -> Self {
        Self {
            stacks,
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            max_attempts: MAX_WAIT_ATTEMPTS,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Wait for both batches, create-pending first
    pub async fn wait_all(&self, batches: &WaitBatches) -> Result<(), StackError> {
        for kind in [WaitKind::CreateComplete, WaitKind::UpdateComplete] {
            let batch = batches.batch(kind);
            if batch.is_empty() {
                continue;
            }
            info!(
                count = batch.len(),
                expected = kind.expected_status_name(),
                "waiting for stack batch"
            );
            for stack_name in batch {
                self.wait_for(stack_name, kind).await?;
            }
        }
        Ok(())
    }

    async fn wait_for(&self, stack_name: &str, kind: WaitKind) -> Result<(), StackError> {
        for attempt in 1..=self.max_attempts {
            let status = self.stacks.stack_status(stack_name).await?;

            if status == kind.expected_status() {
                debug!(stack = %stack_name, attempt, "stack converged");
                return Ok(());
            }
            if status.is_failure() {
                return Err(StackError::operation_failed(
                    stack_name,
                    format!("stack entered terminal status {:?} while waiting", status),
                ));
            }
            if attempt < self.max_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(StackError::WaitTimeout {
            stack_name: stack_name.to_string(),
            expected: kind.expected_status_name().to_string(),
            attempts: self.max_attempts,
        })
    }
}
