//! Infrastructure stack provider interface and adapters.

pub mod cloudformation;
pub mod stack_interface;

pub use cloudformation::CloudFormationCli;
pub use stack_interface::{StackError, StackOperations, StackParameter, StackRequest, StackStatus};
