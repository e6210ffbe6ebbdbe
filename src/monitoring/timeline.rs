//! Execution Timeline
//!
//! Records when each invoked operation starts, completes, or fails, for
//! debug logging and the CLI timeline report.

use std::time::{Duration, Instant};

/// Type of timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Operation was invoked
    Started,
    /// Operation returned normally
    Completed,
    /// Operation failed
    Failed,
}

/// A single event in the execution timeline.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    /// Name of the operation
    pub operation: String,
    /// Type of event
    pub event_type: EventType,
    /// When the event occurred
    pub timestamp: Instant,
}

/// Timed record of one finished invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub operation: String,
    pub duration: Duration,
    pub failed: bool,
}

/// Tracks the invocations of one suite run.
///
/// Per-test hooks run once per test, so the same operation name appears
/// many times; events are kept in the order they happened.
#[derive(Debug, Clone)]
pub struct ExecutionTimeline {
    events: Vec<TimelineEvent>,
    start_time: Instant,
}

impl ExecutionTimeline {
    /// Creates a new timeline starting now.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Records an event for an operation.
    pub fn add_event(&mut self, operation: impl Into<String>, event_type: EventType) {
        self.events.push(TimelineEvent {
            operation: operation.into(),
            event_type,
            timestamp: Instant::now(),
        });
    }

    /// Returns all recorded events.
    pub fn get_events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Names of the operations that were started, in invocation order.
    pub fn invoked(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.event_type == EventType::Started)
            .map(|e| e.operation.as_str())
            .collect()
    }

    /// Returns true if any recorded invocation failed.
    pub fn has_failure(&self) -> bool {
        self.events.iter().any(|e| e.event_type == EventType::Failed)
    }

    /// Returns the total elapsed time since timeline creation.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Pairs each start with the completion or failure that follows it.
    ///
    /// Execution is sequential, so an invocation always ends before the
    /// next one starts. A trailing start without an end is dropped.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut open: Option<&TimelineEvent> = None;

        for event in &self.events {
            match event.event_type {
                EventType::Started => open = Some(event),
                EventType::Completed | EventType::Failed => {
                    if let Some(start) = open.take() {
                        spans.push(Span {
                            operation: start.operation.clone(),
                            duration: event.timestamp.duration_since(start.timestamp),
                            failed: event.event_type == EventType::Failed,
                        });
                    }
                }
            }
        }

        spans
    }

    /// Generates a plain-text report of every invocation.
    pub fn report(&self) -> String {
        let mut output = String::from("\nExecution Timeline:\n\n");

        for span in self.spans() {
            output.push_str(&format!(
                "{:24} {:>8.3} ms{}\n",
                truncate(&span.operation, 24),
                span.duration.as_secs_f64() * 1000.0,
                if span.failed { "  FAILED" } else { "" }
            ));
        }

        output.push_str(&format!("\nTotal: {} ms\n", self.elapsed().as_millis()));
        output
    }
}

impl Default for ExecutionTimeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads or truncates a string to a fixed width.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
