use crate::aggregate::{Aggregator, AggregatorKind};
use std::{any::Any, borrow::Cow, fmt, sync::Arc};

/// Zero-argument constructor for a boxed aggregator.
pub type AggregatorConstructor = Arc<dyn Fn() -> Box<dyn Aggregator> + Send + Sync>;

/// Shared handle stored on builders and carried by IR nodes.
pub type SharedAggregatorFactory = Arc<dyn AggregatorFactory>;

///
/// AggregatorFactory
///
/// Deferred-construction handle: produces a fresh aggregator on demand.
/// Each call to `create` must return an independent instance.
///

pub trait AggregatorFactory: fmt::Debug + Send + Sync {
    fn kind(&self) -> AggregatorKind;

    /// Human-readable strategy name used in diagnostics.
    fn name(&self) -> &str;

    fn create(&self) -> Box<dyn Aggregator>;

    /// Concrete factory access for consumers that inspect strategy state.
    fn as_any(&self) -> &dyn Any;
}

///
/// DefaultAggregatorFactory
///
/// Wraps an aggregator type whose zero-argument constructor was resolved when
/// the strategy was selected.
///

#[derive(Clone)]
pub struct DefaultAggregatorFactory {
    name: Cow<'static, str>,
    kind: AggregatorKind,
    constructor: AggregatorConstructor,
}

impl DefaultAggregatorFactory {
    #[must_use]
    pub(crate) fn new(
        name: Cow<'static, str>,
        kind: AggregatorKind,
        constructor: AggregatorConstructor,
    ) -> Self {
        Self {
            name,
            kind,
            constructor,
        }
    }
}

impl AggregatorFactory for DefaultAggregatorFactory {
    fn kind(&self) -> AggregatorKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Box<dyn Aggregator> {
        (self.constructor)()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for DefaultAggregatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAggregatorFactory")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

///
/// CustomAggregatorFactory
///
/// Factory for strategies that need runtime-supplied construction state.
///

#[derive(Clone)]
pub struct CustomAggregatorFactory {
    name: Cow<'static, str>,
    constructor: AggregatorConstructor,
}

impl CustomAggregatorFactory {
    pub fn new<F, A>(name: impl Into<Cow<'static, str>>, constructor: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
        A: Aggregator + 'static,
    {
        Self {
            name: name.into(),
            constructor: Arc::new(move || Box::new(constructor()) as Box<dyn Aggregator>),
        }
    }
}

impl AggregatorFactory for CustomAggregatorFactory {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Custom
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Box<dyn Aggregator> {
        (self.constructor)()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for CustomAggregatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAggregatorFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
