//! Suite Definition Module
//!
//! Provides data structures and utilities for describing, discovering,
//! validating, and ordering the operations of a test suite.
//!
//! # Structure
//!
//! - [`model`]: Core data structures (Operation, Tag, ParamType, Value, Suite)
//! - [`discovery`]: Classification of operations into role buckets
//! - [`validator`]: Structural rules checked before any invocation
//! - [`planner`]: Test ordering and dry-run plans
//! - [`table`]: Inline-table parsing and argument coercion

pub mod discovery;
pub mod model;
pub mod planner;
pub mod table;
pub mod validator;

pub use discovery::{SuiteDescriptor, TestCase};
pub use model::{arg, Failure, Handler, Operation, Outcome, ParamType, Suite, Tag, Value};
pub use planner::{order_tests, ExecutionPlan};
pub use table::{bind_arguments, TableError};
pub use validator::validate_suite;
