//! Execution Planner
//!
//! Orders tests for execution and builds the serializable plan shown by
//! dry runs.
//!
//! Order: priority descending (10 runs first), then operation name
//! ascending within a priority tier.

use log::debug;
use serde::Serialize;

use super::discovery::{SuiteDescriptor, TestCase};
use super::model::ParamType;

/// Returns the tests in execution order.
///
/// Pure and deterministic: the same input always yields the same order.
pub fn order_tests(tests: &[TestCase]) -> Vec<TestCase> {
    let mut ordered = tests.to_vec();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));

    debug!(
        "Test order: {:?}",
        ordered
            .iter()
            .map(|t| format!("{}(p{})", t.name, t.priority))
            .collect::<Vec<_>>()
    );

    ordered
}

/// One planned test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTest {
    pub name: String,
    pub priority: i32,
    pub params: Vec<ParamType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// What a run would do, without invoking anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
    pub suite: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_suite: Option<String>,
    pub before_each: Vec<String>,
    pub tests: Vec<PlannedTest>,
    pub after_each: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_suite: Option<String>,
}

impl ExecutionPlan {
    /// Builds the plan for an already validated suite.
    pub fn build<S>(descriptor: &SuiteDescriptor<S>, suite: &str) -> Self {
        let tests = order_tests(descriptor.tests())
            .into_iter()
            .map(|test| PlannedTest {
                params: descriptor.operation(test.index).params().to_vec(),
                name: test.name,
                priority: test.priority,
                table: test.table,
            })
            .collect();

        Self {
            suite: suite.to_string(),
            before_suite: descriptor.before_suite().next().map(|op| op.name().to_string()),
            before_each: descriptor.before_each().map(|op| op.name().to_string()).collect(),
            tests,
            after_each: descriptor.after_each().map(|op| op.name().to_string()).collect(),
            after_suite: descriptor.after_suite().next().map(|op| op.name().to_string()),
        }
    }

    /// Number of planned tests.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Human-readable listing used by the CLI dry run.
    pub fn describe(&self) -> String {
        let mut output = format!("Suite: {}\n", self.suite);

        if let Some(ref setup) = self.before_suite {
            output.push_str(&format!("  suite setup:    {}\n", setup));
        }

        for test in &self.tests {
            output.push_str(&format!("  [p{:>2}] {}", test.priority, test.name));
            if let Some(ref table) = test.table {
                output.push_str(&format!("  <- \"{}\"", table));
            }
            output.push('\n');
        }

        if let Some(ref teardown) = self.after_suite {
            output.push_str(&format!("  suite teardown: {}\n", teardown));
        }

        output
    }
}
