//! Use cases and business workflows.

pub mod services;
pub mod use_cases;
