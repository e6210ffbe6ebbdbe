//! Suite Data Model
//!
//! Core data structures describing a test suite: the operations it
//! registers, their role tags, declared parameter types, and the typed
//! values handed to them at invocation time.
//!
//! # Example
//!
//! ```
//! use suiterunner::suite::{arg, Failure, Operation, ParamType, Suite, Value};
//!
//! #[derive(Default)]
//! struct Arithmetic {
//!     checks: usize,
//! }
//!
//! impl Arithmetic {
//!     fn sum(&mut self, args: &[Value]) -> Result<(), Failure> {
//!         let a: i32 = arg(args, 0)?;
//!         let b: i32 = arg(args, 1)?;
//!         self.checks += 1;
//!         if a + b != 5 {
//!             return Err(format!("{} + {} != 5", a, b).into());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl Suite for Arithmetic {
//!     const NAME: &'static str = "Arithmetic";
//!
//!     fn operations() -> Vec<Operation<Self>> {
//!         vec![
//!             Operation::function("init", |_| Ok(())).before_suite(),
//!             Operation::method("sum", Self::sum)
//!                 .with_params(vec![ParamType::Int, ParamType::Int])
//!                 .test_with_priority(7)
//!                 .with_table("2, 3"),
//!         ]
//!     }
//!
//!     fn instantiate() -> Result<Self, Failure> {
//!         Ok(Self::default())
//!     }
//! }
//!
//! suiterunner::run_tests::<Arithmetic>().unwrap();
//! ```

use std::fmt;

use serde::Serialize;

pub use crate::error::{Failure, Outcome};

/// Lowest accepted test priority.
pub const MIN_PRIORITY: i32 = 1;

/// Highest accepted test priority.
pub const MAX_PRIORITY: i32 = 10;

/// Priority given to tests that don't specify one.
pub const DEFAULT_PRIORITY: i32 = 5;

/// Role tag attached to an operation.
///
/// An operation may carry several tags; a test is usually tagged both
/// `Test` and `Table` when it is parameterized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Tag {
    /// Runs once before anything else
    BeforeSuite,
    /// Runs once after every test succeeded
    AfterSuite,
    /// Runs before each test
    BeforeTest,
    /// Runs after each test
    AfterTest,
    /// A test with its execution priority
    Test { priority: i32 },
    /// One inline-table row supplying the test arguments
    Table(String),
}

/// Declared type of an operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParamType {
    Text,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    /// A type the argument marshaler cannot produce
    Unsupported(String),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "String"),
            Self::Byte => write!(f, "i8"),
            Self::Short => write!(f, "i16"),
            Self::Int => write!(f, "i32"),
            Self::Long => write!(f, "i64"),
            Self::Float => write!(f, "f32"),
            Self::Double => write!(f, "f64"),
            Self::Bool => write!(f, "bool"),
            Self::Char => write!(f, "char"),
            Self::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

/// A typed argument value produced from an inline-table token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{:?}", v),
            Self::Byte(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{:?}", v),
        }
    }
}

/// Extraction of a Rust value from an argument [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    String => Text,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    char => Char,
}

/// Reads the argument at `index` as `T`.
///
/// Fails when the index is out of range or the value has a different type,
/// which only happens when an operation's declared parameters disagree with
/// what its body reads.
pub fn arg<T: FromValue>(args: &[Value], index: usize) -> Result<T, Failure> {
    let value = args
        .get(index)
        .ok_or_else(|| format!("Missing argument #{} ({} supplied)", index, args.len()))?;

    T::from_value(value).ok_or_else(|| {
        format!(
            "Argument #{} has unexpected type: {:?} (wanted {})",
            index,
            value,
            std::any::type_name::<T>()
        )
        .into()
    })
}

/// Invocable handle of an operation.
pub enum Handler<S> {
    /// Needs no suite instance
    Static(fn(&[Value]) -> Outcome),
    /// Runs against the shared suite instance
    Instance(fn(&mut S, &[Value]) -> Outcome),
}

impl<S> Clone for Handler<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Handler<S> {}

impl<S> fmt::Debug for Handler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => write!(f, "Handler::Static"),
            Self::Instance(_) => write!(f, "Handler::Instance"),
        }
    }
}

/// One registered operation of a suite.
pub struct Operation<S> {
    name: String,
    params: Vec<ParamType>,
    tags: Vec<Tag>,
    handler: Handler<S>,
}

impl<S> Operation<S> {
    /// Registers an operation that needs no suite instance.
    pub fn function(name: impl Into<String>, f: fn(&[Value]) -> Outcome) -> Self {
        Self::with_handler(name, Handler::Static(f))
    }

    /// Registers an operation that runs against the suite instance.
    pub fn method(name: impl Into<String>, f: fn(&mut S, &[Value]) -> Outcome) -> Self {
        Self::with_handler(name, Handler::Instance(f))
    }

    fn with_handler(name: impl Into<String>, handler: Handler<S>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            params: Vec::new(),
            tags: Vec::new(),
            handler,
        }
    }

    /// Declares the ordered parameter types.
    pub fn with_params(mut self, params: Vec<ParamType>) -> Self {
        self.params = params;
        self
    }

    /// Appends one declared parameter type.
    pub fn with_param(mut self, param: ParamType) -> Self {
        self.params.push(param);
        self
    }

    /// Attaches an arbitrary role tag.
    pub fn tagged(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn before_suite(self) -> Self {
        self.tagged(Tag::BeforeSuite)
    }

    pub fn after_suite(self) -> Self {
        self.tagged(Tag::AfterSuite)
    }

    pub fn before_each(self) -> Self {
        self.tagged(Tag::BeforeTest)
    }

    pub fn after_each(self) -> Self {
        self.tagged(Tag::AfterTest)
    }

    /// Marks the operation as a test with the default priority.
    pub fn test(self) -> Self {
        self.test_with_priority(DEFAULT_PRIORITY)
    }

    /// Marks the operation as a test with an explicit priority.
    pub fn test_with_priority(self, priority: i32) -> Self {
        self.tagged(Tag::Test { priority })
    }

    /// Supplies one inline-table row of arguments.
    pub fn with_table(self, row: impl Into<String>) -> Self {
        self.tagged(Tag::Table(row.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn handler(&self) -> Handler<S> {
        self.handler
    }

    /// Returns true if the operation carries the given tag.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Returns the priority of the first `Test` tag, if any.
    pub fn test_priority(&self) -> Option<i32> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Test { priority } => Some(*priority),
            _ => None,
        })
    }

    /// Returns the first inline-table row, if any.
    pub fn table(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Table(row) => Some(row.as_str()),
            _ => None,
        })
    }

    /// Returns true if invoking this operation needs a suite instance.
    pub fn requires_instance(&self) -> bool {
        matches!(self.handler, Handler::Instance(_))
    }

    /// Diagnostic signature, e.g. `SampleSuite::csv_driven_test(i32, String)`.
    pub fn signature(&self, suite: &str) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        format!("{}::{}({})", suite, self.name, params.join(", "))
    }
}

impl<S> fmt::Debug for Operation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("tags", &self.tags)
            .field("handler", &self.handler)
            .finish()
    }
}

/// A type whose operations can be discovered and run.
///
/// `operations` is the registration table: it lists every operation in
/// declaration order, which is also the order per-test hooks run in.
pub trait Suite: Sized {
    /// Name used in diagnostics
    const NAME: &'static str;

    /// Returns every operation the suite declares.
    fn operations() -> Vec<Operation<Self>>;

    /// Builds the instance shared by per-test hooks and tests.
    fn instantiate() -> Result<Self, Failure>;
}
