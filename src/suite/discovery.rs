//! Suite Discovery
//!
//! Walks a suite's registration table once and sorts every operation into
//! role buckets. Conflicts such as duplicate suite hooks are only recorded
//! here; reporting them is the validator's job.

use log::{debug, warn};

use super::model::{Operation, Suite, Tag, DEFAULT_PRIORITY};

/// A discovered test: the operation it refers to plus its test metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Position of the operation in the registration table
    pub index: usize,
    /// Operation name, used as the ordering tie-break
    pub name: String,
    /// Execution priority (validated to lie in [1,10])
    pub priority: i32,
    /// Inline-table row, if the test is parameterized
    pub table: Option<String>,
}

/// Classified view of a suite's operations.
///
/// Buckets hold indices into the registration table, so an operation that
/// carries several tags appears in each matching bucket.
#[derive(Debug)]
pub struct SuiteDescriptor<S> {
    operations: Vec<Operation<S>>,
    before_suite: Vec<usize>,
    after_suite: Vec<usize>,
    before_each: Vec<usize>,
    after_each: Vec<usize>,
    tests: Vec<TestCase>,
}

impl<S: Suite> SuiteDescriptor<S> {
    /// Discovers the operations declared by `S`.
    pub fn discover() -> Self {
        Self::from_operations(S::operations())
    }
}

impl<S> SuiteDescriptor<S> {
    /// Classifies an explicit list of operations.
    pub fn from_operations(operations: Vec<Operation<S>>) -> Self {
        let mut descriptor = Self {
            operations: Vec::new(),
            before_suite: Vec::new(),
            after_suite: Vec::new(),
            before_each: Vec::new(),
            after_each: Vec::new(),
            tests: Vec::new(),
        };

        for (index, op) in operations.iter().enumerate() {
            if op.has_tag(&Tag::BeforeSuite) {
                descriptor.before_suite.push(index);
            }
            if op.has_tag(&Tag::AfterSuite) {
                descriptor.after_suite.push(index);
            }
            if op.has_tag(&Tag::BeforeTest) {
                descriptor.before_each.push(index);
            }
            if op.has_tag(&Tag::AfterTest) {
                descriptor.after_each.push(index);
            }

            match op.test_priority() {
                Some(priority) => descriptor.tests.push(TestCase {
                    index,
                    name: op.name().to_string(),
                    priority,
                    table: op.table().map(str::to_string),
                }),
                None if op.table().is_some() => {
                    warn!(
                        "Operation '{}' has an inline table but is not a test; ignoring it",
                        op.name()
                    );
                }
                None => {}
            }

            if op.tags().is_empty() {
                debug!("Operation '{}' has no role tags", op.name());
            }
        }

        descriptor.operations = operations;

        debug!(
            "Discovered {} operations: {} suite setup, {} suite teardown, {} test setup, {} test teardown, {} tests",
            descriptor.operations.len(),
            descriptor.before_suite.len(),
            descriptor.after_suite.len(),
            descriptor.before_each.len(),
            descriptor.after_each.len(),
            descriptor.tests.len()
        );

        descriptor
    }

    /// Returns the operation at `index` in the registration table.
    ///
    /// # Panics
    ///
    /// Panics if `index` did not come from this descriptor.
    pub fn operation(&self, index: usize) -> &Operation<S> {
        &self.operations[index]
    }

    pub fn operations(&self) -> &[Operation<S>] {
        &self.operations
    }

    pub fn before_suite(&self) -> impl Iterator<Item = &Operation<S>> {
        self.before_suite.iter().map(|&i| &self.operations[i])
    }

    pub fn after_suite(&self) -> impl Iterator<Item = &Operation<S>> {
        self.after_suite.iter().map(|&i| &self.operations[i])
    }

    pub fn before_each(&self) -> impl Iterator<Item = &Operation<S>> {
        self.before_each.iter().map(|&i| &self.operations[i])
    }

    pub fn after_each(&self) -> impl Iterator<Item = &Operation<S>> {
        self.after_each.iter().map(|&i| &self.operations[i])
    }

    /// Tests in discovery order.
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }
}
