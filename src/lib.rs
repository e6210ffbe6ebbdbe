//! SuiteRunner - Lifecycle Test Suite Runner
//!
//! A minimal test-execution engine. A suite registers its operations with
//! role tags; the engine validates them, orders the tests by priority, and
//! runs suite setup, each test wrapped by its per-test hooks, and suite
//! teardown, aborting on the first failure. Tests may take their arguments
//! from a single inline-table row.
//!
//! # Architecture
//!
//! - [`suite`]: Operation model, discovery, validation, ordering, and
//!   inline-table arguments
//! - [`execution`]: The lifecycle engine
//! - [`monitoring`]: Invocation timeline
//! - [`error`]: The run error taxonomy
//! - [`sample`]: A demonstration suite
//!
//! # Example
//!
//! ```rust,no_run
//! use suiterunner::execution::Engine;
//! use suiterunner::sample::SampleSuite;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::<SampleSuite>::new();
//!     println!("{}", engine.plan()?.describe());
//!
//!     engine.run()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod execution;
pub mod monitoring;
pub mod sample;
pub mod suite;

// Re-export commonly used types
pub use error::{ErrorKind, RunError};
pub use execution::engine::{run_tests, Engine};
pub use suite::model::{Operation, ParamType, Suite, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "SuiteRunner";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "SuiteRunner");
    }

    #[test]
    fn test_module_exports_run_tests() {
        assert!(run_tests::<sample::SampleSuite>().is_ok());
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        for part in parts {
            assert!(part.parse::<u32>().is_ok(), "Version components should be numeric");
        }
    }
}
