use crate::value::Value;
use std::{fmt, sync::Arc};

/// Pure function from a source element to a derived value.
pub type SelectorFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

///
/// Selector
///
/// Derives a value from a source element. Selectors are carried unevaluated
/// by factories and only applied by the aggregators they create.
///
/// Equality is structural for `Field` and `Identity`, and pointer identity
/// for `Function`.
///

#[derive(Clone)]
pub enum Selector {
    /// Read a named field of a record; missing fields select `Value::Null`.
    Field(String),

    Function(SelectorFn),

    /// Select the element itself.
    Identity,
}

impl Selector {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Apply the selector to one source element.
    #[must_use]
    pub fn select(&self, element: &Value) -> Value {
        match self {
            Self::Field(name) => element.field(name).cloned().unwrap_or(Value::Null),
            Self::Function(f) => f(element),
            Self::Identity => element.clone(),
        }
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Arc::ptr_eq(a, b),
            (Self::Identity, Self::Identity) => true,
            _ => false,
        }
    }
}

impl Eq for Selector {}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Function(func) => write!(f, "Function({:p})", Arc::as_ptr(func).cast::<()>()),
            Self::Identity => f.write_str("Identity"),
        }
    }
}
