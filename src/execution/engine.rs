//! Suite Execution Engine
//!
//! The core engine that drives a suite run:
//! - Structural validation before anything is invoked
//! - Suite setup, then each test in priority order wrapped by its per-test
//!   setups and teardowns, then suite teardown
//! - Lazy construction of the shared suite instance
//! - Fail-fast abort on the first error of any kind

use std::time::Instant;

use log::{debug, error, info};

use crate::error::RunError;
use crate::monitoring::{EventType, ExecutionTimeline};
use crate::suite::discovery::SuiteDescriptor;
use crate::suite::model::{Operation, Suite, Value};
use crate::suite::planner::{order_tests, ExecutionPlan};
use crate::suite::table::bind_arguments;
use crate::suite::validator::{ensure_no_params, validate_suite};

use super::invoke::{instantiate_suite, invoke_operation};
use super::state::RunState;

/// Runs every test of suite `S`.
///
/// Completes silently when everything passes; otherwise returns the first
/// error encountered.
///
/// # Example
///
/// ```rust,no_run
/// use suiterunner::run_tests;
/// use suiterunner::sample::SampleSuite;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_tests::<SampleSuite>()?;
///     Ok(())
/// }
/// ```
pub fn run_tests<S: Suite>() -> Result<(), RunError> {
    Engine::<S>::new().run()
}

/// Suite execution engine.
///
/// Owns the discovered suite, the lazily built suite instance, the run
/// state, and the invocation timeline of the most recent run.
pub struct Engine<S: Suite> {
    descriptor: SuiteDescriptor<S>,
    instance: Option<S>,
    state: RunState,
    timeline: ExecutionTimeline,
}

impl<S: Suite> Engine<S> {
    /// Creates an engine for the operations declared by `S`.
    pub fn new() -> Self {
        Self::from_descriptor(SuiteDescriptor::discover())
    }

    /// Creates an engine for an already discovered suite.
    pub fn from_descriptor(descriptor: SuiteDescriptor<S>) -> Self {
        Self {
            descriptor,
            instance: None,
            state: RunState::NotStarted,
            timeline: ExecutionTimeline::new(),
        }
    }

    /// Lifecycle state reached by the most recent run.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Invocations performed by the most recent run.
    pub fn timeline(&self) -> &ExecutionTimeline {
        &self.timeline
    }

    /// Returns true if the most recent run built a suite instance.
    pub fn is_instantiated(&self) -> bool {
        self.instance.is_some()
    }

    /// Validates the suite and returns the planned order without invoking
    /// anything.
    pub fn plan(&self) -> Result<ExecutionPlan, RunError> {
        validate_suite(&self.descriptor, S::NAME)?;
        Ok(ExecutionPlan::build(&self.descriptor, S::NAME))
    }

    /// Executes the suite.
    ///
    /// Each call is an independent run with a fresh instance and timeline.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Every hook and test succeeded
    /// * `Err` - The first error; nothing after it was invoked
    pub fn run(&mut self) -> Result<(), RunError> {
        let start_time = Instant::now();

        self.instance = None;
        self.state = RunState::NotStarted;
        self.timeline = ExecutionTimeline::new();

        info!("Running suite {}", S::NAME);

        let mut run = Run {
            instance: &mut self.instance,
            state: &mut self.state,
            timeline: &mut self.timeline,
        };

        match run.execute(&self.descriptor) {
            Ok(tests) => {
                info!(
                    "Suite {} passed: {} tests in {:.2?}",
                    S::NAME,
                    tests,
                    start_time.elapsed()
                );
                Ok(())
            }
            Err(e) => {
                error!("Suite {} aborted after {}: {}", S::NAME, run.state, e);
                run.advance(RunState::Aborted);
                Err(e)
            }
        }
    }
}

impl<S: Suite> Default for Engine<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable parts of the engine borrowed for one run, so the descriptor can
/// stay borrowed immutably while operations are invoked.
struct Run<'a, S: Suite> {
    instance: &'a mut Option<S>,
    state: &'a mut RunState,
    timeline: &'a mut ExecutionTimeline,
}

impl<S: Suite> Run<'_, S> {
    /// Runs the whole lifecycle and returns the number of tests executed.
    fn execute(&mut self, descriptor: &SuiteDescriptor<S>) -> Result<usize, RunError> {
        validate_suite(descriptor, S::NAME)?;
        let ordered = order_tests(descriptor.tests());

        if let Some(setup) = descriptor.before_suite().next() {
            self.call(setup, &[])?;
        }
        self.advance(RunState::SuiteSetupDone);

        for test in &ordered {
            for setup in descriptor.before_each() {
                self.call(setup, &[])?;
            }
            self.advance(RunState::TestSetupDone(test.name.clone()));

            let op = descriptor.operation(test.index);
            let args = match test.table {
                Some(ref row) => {
                    bind_arguments(row, op.params()).map_err(|source| RunError::Table {
                        signature: op.signature(S::NAME),
                        source,
                    })?
                }
                None => {
                    ensure_no_params(op, S::NAME)?;
                    Vec::new()
                }
            };

            info!("Test: {} (priority {})", test.name, test.priority);
            self.call(op, &args)?;
            self.advance(RunState::TestInvoked(test.name.clone()));

            for teardown in descriptor.after_each() {
                self.call(teardown, &[])?;
            }
            self.advance(RunState::TestTeardownDone(test.name.clone()));
        }

        if let Some(teardown) = descriptor.after_suite().next() {
            self.call(teardown, &[])?;
        }
        self.advance(RunState::SuiteTeardownDone);
        self.advance(RunState::Finished);

        Ok(ordered.len())
    }

    /// Invokes one operation, building the suite instance first if the
    /// operation needs it and none exists yet.
    fn call(&mut self, op: &Operation<S>, args: &[Value]) -> Result<(), RunError> {
        if op.requires_instance() && self.instance.is_none() {
            let instance = instantiate_suite::<S>()?;
            info!("Instantiated suite {}", S::NAME);
            *self.instance = Some(instance);
        }

        self.timeline.add_event(op.name(), EventType::Started);

        match invoke_operation(op, self.instance.as_mut(), args, S::NAME) {
            Ok(()) => {
                self.timeline.add_event(op.name(), EventType::Completed);
                Ok(())
            }
            Err(e) => {
                self.timeline.add_event(op.name(), EventType::Failed);
                Err(e)
            }
        }
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_advance_to(&next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!("State: {} -> {}", self.state, next);
        *self.state = next;
    }
}
