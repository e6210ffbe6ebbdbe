//! Sample Suite
//!
//! A small suite exercising every role tag, used by the CLI and as a
//! reference for writing suites.

use log::info;

use crate::suite::{arg, Failure, Operation, Outcome, ParamType, Suite, Value};

/// Demonstration suite with suite hooks, per-test hooks, prioritized
/// tests, and one table-driven test.
#[derive(Debug, Default)]
pub struct SampleSuite {
    tests_run: usize,
}

impl SampleSuite {
    fn before_each(&mut self, _: &[Value]) -> Outcome {
        info!("  [BeforeTest] setup");
        Ok(())
    }

    fn after_each(&mut self, _: &[Value]) -> Outcome {
        self.tests_run += 1;
        info!("  [AfterTest] teardown ({} done)", self.tests_run);
        Ok(())
    }

    fn high_priority_test(&mut self, _: &[Value]) -> Outcome {
        info!("    [Test p10] high_priority_test executed");
        Ok(())
    }

    fn low_priority_test(&mut self, _: &[Value]) -> Outcome {
        info!("    [Test p1] low_priority_test executed");
        Ok(())
    }

    fn default_priority_test(&mut self, _: &[Value]) -> Outcome {
        info!("    [Test p5] default_priority_test executed");
        Ok(())
    }

    fn csv_driven_test(&mut self, args: &[Value]) -> Outcome {
        let a: i32 = arg(args, 0)?;
        let b: String = arg(args, 1)?;
        let c: i32 = arg(args, 2)?;
        let d: bool = arg(args, 3)?;

        info!(
            "    [Test p7] csv_driven_test args: a={}, b={}, c={}, d={}",
            a, b, c, d
        );

        if a + c != 30 || !d || b != "Java" {
            return Err("csv_driven_test failed".into());
        }
        Ok(())
    }
}

impl Suite for SampleSuite {
    const NAME: &'static str = "SampleSuite";

    fn operations() -> Vec<Operation<Self>> {
        vec![
            Operation::function("init_suite", |_| {
                info!("[BeforeSuite] Initialize shared resources");
                Ok(())
            })
            .before_suite(),
            Operation::function("tear_down_suite", |_| {
                info!("[AfterSuite] Cleanup shared resources");
                Ok(())
            })
            .after_suite(),
            Operation::method("before_each", Self::before_each).before_each(),
            Operation::method("after_each", Self::after_each).after_each(),
            Operation::method("high_priority_test", Self::high_priority_test).test_with_priority(10),
            Operation::method("low_priority_test", Self::low_priority_test).test_with_priority(1),
            Operation::method("default_priority_test", Self::default_priority_test).test(),
            Operation::method("csv_driven_test", Self::csv_driven_test)
                .with_params(vec![ParamType::Int, ParamType::Text, ParamType::Int, ParamType::Bool])
                .test_with_priority(7)
                .with_table("10, Java, 20, true"),
        ]
    }

    fn instantiate() -> Result<Self, Failure> {
        Ok(Self::default())
    }
}
