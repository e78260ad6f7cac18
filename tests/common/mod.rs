//! Common test utilities and helpers
//!
//! This module provides shared fake collaborators that can be used across
//! different test modules to isolate the provisioning flows from the real
//! AWS CLI and platform APIs.

pub mod fake_services;
