//! Run Monitoring Module
//!
//! Tracks which operations a run invoked and how long each one took.
//!
//! # Components
//!
//! - [`ExecutionTimeline`]: Invocation start/end timing per operation

pub mod timeline;

pub use timeline::{EventType, ExecutionTimeline, Span, TimelineEvent};
