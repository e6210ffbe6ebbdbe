//! Run Errors
//!
//! Every problem the engine can hit is reported as a single [`RunError`].
//! There is no recovery: the first error aborts the whole run.

use thiserror::Error;

use crate::suite::table::TableError;

/// Failure raised by a suite operation or by suite construction.
pub type Failure = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by every suite operation.
pub type Outcome = Result<(), Failure>;

/// Broad category of a [`RunError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Suite definition is inconsistent (duplicate hooks, bad priority, arity)
    Structural,
    /// An inline-table token could not be coerced to its declared type
    Conversion,
    /// An operation returned a failure or panicked
    Invocation,
    /// The suite instance could not be constructed
    Instantiation,
}

/// Error that aborted a suite run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{hook} must be invocable without a suite instance: {signature}")]
    InstanceBoundSuiteHook {
        hook: &'static str,
        signature: String,
    },

    #[error("Multiple {hook} operations are not allowed ({first} and {second})")]
    DuplicateSuiteHook {
        hook: &'static str,
        first: String,
        second: String,
    },

    #[error("Test priority must be in [{min},{max}] but is {priority} for: {signature}")]
    PriorityOutOfRange {
        priority: i32,
        min: i32,
        max: i32,
        signature: String,
    },

    #[error("Test must have no parameters or carry an inline table: {signature}")]
    UnexpectedParameters { signature: String },

    #[error("Cannot bind inline table for {signature}: {source}")]
    Table {
        signature: String,
        #[source]
        source: TableError,
    },

    #[error("Error invoking {signature} -> {source}")]
    Invocation {
        signature: String,
        #[source]
        source: Failure,
    },

    #[error("Failed to instantiate suite {suite}: {source}")]
    Instantiation {
        suite: &'static str,
        #[source]
        source: Failure,
    },
}

impl RunError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InstanceBoundSuiteHook { .. }
            | Self::DuplicateSuiteHook { .. }
            | Self::PriorityOutOfRange { .. }
            | Self::UnexpectedParameters { .. } => ErrorKind::Structural,
            Self::Table { source, .. } => source.kind(),
            Self::Invocation { .. } => ErrorKind::Invocation,
            Self::Instantiation { .. } => ErrorKind::Instantiation,
        }
    }
}
