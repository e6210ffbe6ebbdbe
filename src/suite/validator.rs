//! Suite Validation
//!
//! Structural checks that must pass before any operation is invoked:
//! - Suite hooks need no suite instance
//! - At most one suite setup and one suite teardown
//! - Every test priority lies in [1,10]
//!
//! The zero-parameter rule for tests without an inline table is checked
//! by the engine when that test is reached, see [`ensure_no_params`].

use log::{debug, info};

use crate::error::RunError;

use super::discovery::{SuiteDescriptor, TestCase};
use super::model::{Operation, Tag, MAX_PRIORITY, MIN_PRIORITY};

const SUITE_SETUP: &str = "suite setup";
const SUITE_TEARDOWN: &str = "suite teardown";

/// Validates a discovered suite.
///
/// Operations are checked in declaration order, each against the suite
/// setup rules and then the suite teardown rules. Test priorities are
/// checked afterwards. The first violation found is returned.
pub fn validate_suite<S>(descriptor: &SuiteDescriptor<S>, suite: &str) -> Result<(), RunError> {
    info!(
        "Validating suite {} with {} tests",
        suite,
        descriptor.tests().len()
    );

    let mut setup = SuiteHook::new(SUITE_SETUP);
    let mut teardown = SuiteHook::new(SUITE_TEARDOWN);

    for op in descriptor.operations() {
        if op.has_tag(&Tag::BeforeSuite) {
            setup.accept(op, suite)?;
        }
        if op.has_tag(&Tag::AfterSuite) {
            teardown.accept(op, suite)?;
        }
    }

    for test in descriptor.tests() {
        validate_priority(test, descriptor.operation(test.index), suite)?;
    }

    debug!("Suite {} passed structural validation", suite);
    Ok(())
}

/// Tracks the single allowed operation for one suite hook role.
struct SuiteHook<'a, S> {
    hook: &'static str,
    first: Option<&'a Operation<S>>,
}

impl<'a, S> SuiteHook<'a, S> {
    fn new(hook: &'static str) -> Self {
        Self { hook, first: None }
    }

    /// Records `op`, rejecting it if it needs an instance or is a second occurrence.
    fn accept(&mut self, op: &'a Operation<S>, suite: &str) -> Result<(), RunError> {
        if op.requires_instance() {
            return Err(RunError::InstanceBoundSuiteHook {
                hook: self.hook,
                signature: op.signature(suite),
            });
        }

        if let Some(existing) = self.first {
            return Err(RunError::DuplicateSuiteHook {
                hook: self.hook,
                first: existing.signature(suite),
                second: op.signature(suite),
            });
        }

        self.first = Some(op);
        Ok(())
    }
}

fn validate_priority<S>(test: &TestCase, op: &Operation<S>, suite: &str) -> Result<(), RunError> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&test.priority) {
        return Ok(());
    }

    Err(RunError::PriorityOutOfRange {
        priority: test.priority,
        min: MIN_PRIORITY,
        max: MAX_PRIORITY,
        signature: op.signature(suite),
    })
}

/// Rejects a test that declares parameters but has no inline table.
pub fn ensure_no_params<S>(op: &Operation<S>, suite: &str) -> Result<(), RunError> {
    if op.params().is_empty() {
        return Ok(());
    }

    Err(RunError::UnexpectedParameters {
        signature: op.signature(suite),
    })
}
