//! Operation Invocation
//!
//! Calls a single suite operation and turns its outcome into a
//! [`RunError`] carrying the operation signature. A panic inside the
//! operation counts as a failure, with the panic message as the cause.
//! Suite construction is guarded the same way.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};

use crate::error::{Failure, RunError};
use crate::suite::model::{Handler, Operation, Suite, Value};

/// Invokes `op` with `args`.
///
/// `instance` must be present for operations with an instance handler;
/// static operations ignore it.
///
/// # Returns
///
/// * `Ok(())` - The operation returned normally
/// * `Err(RunError::Invocation)` - The operation failed or panicked
pub fn invoke_operation<S>(
    op: &Operation<S>,
    instance: Option<&mut S>,
    args: &[Value],
    suite: &str,
) -> Result<(), RunError> {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    debug!("Invoking {} with [{}]", op.signature(suite), rendered.join(", "));

    let caught = panic::catch_unwind(AssertUnwindSafe(|| match (op.handler(), instance) {
        (Handler::Static(f), _) => f(args),
        (Handler::Instance(f), Some(target)) => f(target, args),
        (Handler::Instance(_), None) => Err(Failure::from("no suite instance available")),
    }));

    let outcome = caught.unwrap_or_else(|payload| Err(panic_message(payload.as_ref()).into()));

    outcome.map_err(|source| {
        error!("{} failed: {}", op.signature(suite), source);
        RunError::Invocation {
            signature: op.signature(suite),
            source,
        }
    })
}

/// Builds the shared suite instance.
///
/// A constructor that fails or panics yields `RunError::Instantiation`
/// naming the suite type.
pub fn instantiate_suite<S: Suite>() -> Result<S, RunError> {
    let caught = panic::catch_unwind(S::instantiate);
    let built = caught.unwrap_or_else(|payload| Err(panic_message(payload.as_ref()).into()));

    built.map_err(|source| {
        error!("Cannot instantiate {}: {}", S::NAME, source);
        RunError::Instantiation {
            suite: S::NAME,
            source,
        }
    })
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Outcome};
    use crate::suite::model::{arg, ParamType};

    #[derive(Default)]
    struct Counter {
        total: i32,
    }

    fn add(counter: &mut Counter, args: &[Value]) -> Outcome {
        counter.total += arg::<i32>(args, 0)?;
        Ok(())
    }

    fn explode(_: &mut Counter, _: &[Value]) -> Outcome {
        panic!("assertion went wrong");
    }

    #[test]
    fn test_instance_invocation() {
        let op = Operation::method("add", add).with_param(ParamType::Int);
        let mut counter = Counter::default();

        invoke_operation(&op, Some(&mut counter), &[Value::Int(4)], "Counter").unwrap();
        invoke_operation(&op, Some(&mut counter), &[Value::Int(3)], "Counter").unwrap();

        assert_eq!(counter.total, 7);
    }

    #[test]
    fn test_static_invocation_needs_no_instance() {
        let op: Operation<Counter> = Operation::function("ping", |_| Ok(()));
        assert!(invoke_operation(&op, None, &[], "Counter").is_ok());
    }

    #[test]
    fn test_failure_is_wrapped_with_signature() {
        let op: Operation<Counter> =
            Operation::function("fail", |_| Err("expected 30".into())).with_param(ParamType::Int);

        let err = invoke_operation(&op, None, &[Value::Int(1)], "Counter").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Invocation);
        assert!(err.to_string().contains("Counter::fail(i32)"));
        assert!(err.to_string().contains("expected 30"));
    }

    #[test]
    fn test_panic_becomes_failure() {
        let op = Operation::method("explode", explode);
        let mut counter = Counter::default();

        let err = invoke_operation(&op, Some(&mut counter), &[], "Counter").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Invocation);
        assert!(err.to_string().contains("assertion went wrong"));
    }

    impl Suite for Counter {
        const NAME: &'static str = "Counter";

        fn operations() -> Vec<Operation<Self>> {
            Vec::new()
        }

        fn instantiate() -> Result<Self, Failure> {
            Ok(Self { total: 10 })
        }
    }

    struct Fragile;

    impl Suite for Fragile {
        const NAME: &'static str = "Fragile";

        fn operations() -> Vec<Operation<Self>> {
            Vec::new()
        }

        fn instantiate() -> Result<Self, Failure> {
            panic!("constructor blew up");
        }
    }

    #[test]
    fn test_instantiate_suite() {
        let counter = instantiate_suite::<Counter>().unwrap();
        assert_eq!(counter.total, 10);
    }

    #[test]
    fn test_panicking_constructor_becomes_instantiation_error() {
        let err = instantiate_suite::<Fragile>().err().unwrap();

        assert_eq!(err.kind(), ErrorKind::Instantiation);
        assert!(err.to_string().contains("Fragile"));
        assert!(err.to_string().contains("constructor blew up"));
    }

    #[test]
    fn test_missing_instance_is_failure() {
        let op = Operation::method("add", add);
        assert!(invoke_operation(&op, None, &[Value::Int(1)], "Counter").is_err());
    }
}
