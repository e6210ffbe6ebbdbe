//! Suite Execution Module
//!
//! Provides the engine that runs a suite's lifecycle in order and stops
//! at the first failure.
//!
//! # Architecture
//!
//! - [`engine`]: Main execution engine orchestrating suite runs
//! - [`invoke`]: Invocation of a single operation
//! - [`state`]: Lifecycle states of a run

pub mod engine;
pub mod invoke;
pub mod state;

pub use engine::{run_tests, Engine};
pub use state::RunState;
