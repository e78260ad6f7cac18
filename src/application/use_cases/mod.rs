//! Application use cases.

pub mod provision_repositories;

pub use provision_repositories::{
    ProvisionRepositoriesConfig, ProvisionRepositoriesError, ProvisionRepositoriesUseCase,
    ProvisionResult, ProvisioningServices,
};
