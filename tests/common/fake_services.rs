//! Fake collaborator implementations for integration tests
//!
//! Each fake records its call history so tests can verify how many requests
//! a flow issued and in what order, in addition to checking the final result.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use rmgr::infrastructure::parameters::{ParameterStore, ParameterStoreError};
use rmgr::infrastructure::stacks::{StackError, StackOperations, StackRequest, StackStatus};
use rmgr::infrastructure::vcs::{
    BranchError, BranchOperations, RemoteProjectApi, RemoteProjectError, RemoteProjectOutcome,
    RemoteProjectRequest,
};

/// Fake infrastructure provider for stack operations
pub struct FakeStackProvider {
    /// Stacks that already exist; creation attempts fall back to update
    existing: HashSet<String>,
    /// Whether updates of existing stacks have any changes to apply
    drift: bool,
    /// Whether polls ever reach the terminal success status
    converges: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeStackProvider {
    /// A provider with no pre-existing stacks; creations converge
    pub fn new() -> Self {
        Self {
            existing: HashSet::new(),
            drift: true,
            converges: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mark stacks as pre-existing
    pub fn with_existing(mut self, stack_names: &[&str]) -> Self {
        self.existing = stack_names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Updates of existing stacks report "no updates are to be performed"
    pub fn without_drift(mut self) -> Self {
        self.drift = false;
        self
    }

    /// Polls never reach a terminal status
    pub fn never_converging(mut self) -> Self {
        self.converges = false;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls starting with the given prefix
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for FakeStackProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StackOperations for FakeStackProvider {
    async fn create_stack(&self, request: &StackRequest) -> Result<(), StackError> {
        self.record(format!("create:{}", request.stack_name));
        if self.existing.contains(&request.stack_name) {
            Err(StackError::AlreadyExists {
                stack_name: request.stack_name.clone(),
            })
        } else {
            Ok(())
        }
    }

    async fn update_stack(&self, request: &StackRequest) -> Result<(), StackError> {
        self.record(format!("update:{}", request.stack_name));
        if self.drift {
            Ok(())
        } else {
            Err(StackError::NoUpdates {
                stack_name: request.stack_name.clone(),
            })
        }
    }

    async fn stack_status(&self, stack_name: &str) -> Result<StackStatus, StackError> {
        self.record(format!("status:{}", stack_name));
        if !self.converges {
            return Ok(StackStatus::CreateInProgress);
        }
        if self.existing.contains(stack_name) {
            Ok(StackStatus::UpdateComplete)
        } else {
            Ok(StackStatus::CreateComplete)
        }
    }
}

/// Fake version-control provider for branch operations
pub struct FakeBranchProvider {
    branches: Mutex<HashSet<(String, String)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBranchProvider {
    pub fn new() -> Self {
        Self {
            branches: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Pre-populate a branch, as if a previous invocation created it
    pub fn with_branch(self, repository: &str, branch: &str) -> Self {
        self.branches
            .lock()
            .unwrap()
            .insert((repository.to_string(), branch.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for FakeBranchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BranchOperations for FakeBranchProvider {
    async fn branch_tip(&self, repository: &str, branch: &str) -> Result<String, BranchError> {
        self.record(format!("tip:{}/{}", repository, branch));
        Ok(format!("{}-{}-tip", repository, branch))
    }

    async fn create_branch(
        &self,
        repository: &str,
        branch: &str,
        commit_id: &str,
    ) -> Result<(), BranchError> {
        self.record(format!("create:{}/{}@{}", repository, branch, commit_id));
        let mut branches = self.branches.lock().unwrap();
        if branches.insert((repository.to_string(), branch.to_string())) {
            Ok(())
        } else {
            Err(BranchError::BranchExists {
                repository: repository.to_string(),
                branch: branch.to_string(),
            })
        }
    }
}

/// Fake parameter store backed by a map
pub struct FakeParameterStore {
    parameters: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeParameterStore {
    pub fn new() -> Self {
        Self {
            parameters: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Pre-populate the three GitLab secrets
    pub fn with_gitlab_secrets() -> Self {
        Self::new()
            .with_parameter("/SDLF/GitLab/Url", "https://gitlab.example.com/")
            .with_parameter("/SDLF/GitLab/AccessToken", "glpat-secret")
            .with_parameter("/SDLF/GitLab/NamespaceId", "42")
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.insert(name.to_string(), value.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for FakeParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParameterStore for FakeParameterStore {
    async fn get_parameter(&self, name: &str, decrypt: bool) -> Result<String, ParameterStoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("get:{}:{}", name, decrypt));
        self.parameters
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterStoreError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Fake hosted platform repository API
pub struct FakeRemoteProjectApi {
    /// Project names the platform rejects with a non-2xx status
    existing: HashSet<String>,
    /// Project names whose requests fail at the transport level
    unreachable: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRemoteProjectApi {
    pub fn new() -> Self {
        Self {
            existing: HashSet::new(),
            unreachable: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_existing(mut self, names: &[&str]) -> Self {
        self.existing = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_unreachable(mut self, names: &[&str]) -> Self {
        self.unreachable = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for FakeRemoteProjectApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteProjectApi for FakeRemoteProjectApi {
    async fn create_project(
        &self,
        request: &RemoteProjectRequest,
    ) -> Result<RemoteProjectOutcome, RemoteProjectError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{}", request.name));
        if self.unreachable.contains(&request.name) {
            Err(RemoteProjectError::Transport {
                url: request.api_base_url.clone(),
                message: "connection refused".to_string(),
            })
        } else if self.existing.contains(&request.name) {
            Ok(RemoteProjectOutcome::LikelyExists { status: 400 })
        } else {
            Ok(RemoteProjectOutcome::Created)
        }
    }
}
