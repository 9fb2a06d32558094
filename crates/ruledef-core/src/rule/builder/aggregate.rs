use crate::{
    aggregate::{
        Aggregator, AggregatorRegistry, DefaultAggregatorFactory, GroupByAggregatorFactory,
        ProjectionAggregatorFactory, Selector, SharedAggregatorFactory, TypeDescriptor,
    },
    config::{BuilderConfig, FactoryOverwrite},
    error::Error,
    obs::{ObsEvent, sink::record},
    rule::{
        builder::{AggregateError, PatternBuilder},
        element::AggregateElement,
        scope::{Declaration, Scope, ScopeError},
    },
    types::DataType,
};
use std::sync::Arc;

/// Label of the scope an aggregate builder derives from its parent.
const AGGREGATE_SCOPE: &str = "Aggregate";

///
/// AggregateBuilder
///
/// Builder session for one `AggregateElement`.
///
/// The session must end up holding exactly one aggregation strategy and
/// exactly one source pattern:
/// - strategy selection funnels into a single slot (last write wins unless
///   the config rejects overwrites)
/// - the source pattern can be started once; the returned `PatternBuilder`
///   stays owned by this session and is finalized by `build`
///
/// `build` consumes the session, so a builder cannot be reused.
///

#[derive(Debug)]
pub struct AggregateBuilder {
    scope: Scope,
    result_type: DataType,
    factory: Option<SharedAggregatorFactory>,
    source: Option<PatternBuilder>,
    config: BuilderConfig,
}

impl AggregateBuilder {
    /// Start an aggregate session in a child of `parent`.
    ///
    /// The child scope sees the declarations visible in `parent` at this
    /// call. Bindings declared in `parent` afterwards are not visible to the
    /// session and do not appear in the built element.
    #[must_use]
    pub fn new(result_type: DataType, parent: &Scope) -> Self {
        Self {
            scope: parent.child(AGGREGATE_SCOPE),
            result_type,
            factory: None,
            source: None,
            config: BuilderConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn result_type(&self) -> &DataType {
        &self.result_type
    }

    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    #[must_use]
    pub const fn factory(&self) -> Option<&SharedAggregatorFactory> {
        self.factory.as_ref()
    }

    #[must_use]
    pub const fn source(&self) -> Option<&PatternBuilder> {
        self.source.as_ref()
    }

    pub const fn source_mut(&mut self) -> Option<&mut PatternBuilder> {
        self.source.as_mut()
    }

    // ------------------------------------------------------------------
    // Strategy selection
    // ------------------------------------------------------------------

    /// Select a statically known, default-constructible aggregator type.
    pub fn aggregator<A>(&mut self) -> Result<&mut Self, Error>
    where
        A: Aggregator + Default + 'static,
    {
        self.aggregator_type(&TypeDescriptor::aggregator::<A>())
    }

    /// Select an aggregator type by descriptor.
    ///
    /// The descriptor must carry the aggregator capability and a zero-argument
    /// constructor; the constructor is cached in the resulting factory.
    /// Nothing is stored when either check fails.
    pub fn aggregator_type(&mut self, descriptor: &TypeDescriptor) -> Result<&mut Self, Error> {
        let Some(capability) = descriptor.capability() else {
            self.reject_strategy(descriptor, "missing aggregator capability");
            return Err(AggregateError::NotAnAggregator {
                type_name: descriptor.name().to_string(),
            }
            .into());
        };
        let Some(constructor) = capability.constructor() else {
            self.reject_strategy(descriptor, "missing zero-argument constructor");
            return Err(AggregateError::NoDefaultConstructor {
                type_name: descriptor.name().to_string(),
            }
            .into());
        };

        let factory = DefaultAggregatorFactory::new(
            descriptor.name().to_string().into(),
            capability.kind(),
            Arc::clone(constructor),
        );

        self.aggregator_factory(Arc::new(factory))
    }

    /// Select an aggregator type registered under `name`.
    pub fn aggregator_named(
        &mut self,
        registry: &AggregatorRegistry,
        name: &str,
    ) -> Result<&mut Self, Error> {
        let descriptor = registry.lookup(name)?;

        self.aggregator_type(descriptor)
    }

    /// Select a pre-built factory. No capability checks are performed.
    pub fn aggregator_factory(
        &mut self,
        factory: SharedAggregatorFactory,
    ) -> Result<&mut Self, Error> {
        let replaced = self.factory.is_some();
        if replaced && self.config.aggregate.factory_overwrite == FactoryOverwrite::Reject {
            return Err(AggregateError::FactoryAlreadyConfigured {
                scope: self.scope.path().to_string(),
            }
            .into());
        }

        record(ObsEvent::StrategySelected {
            scope: self.scope.path().to_string(),
            kind: factory.kind(),
            name: factory.name().to_string(),
            replaced,
        });
        self.factory = Some(factory);

        Ok(self)
    }

    /// Collect matched elements of `element` into one sequence.
    pub fn collect(&mut self, element: DataType) -> Result<&mut Self, Error> {
        self.aggregator_type(&TypeDescriptor::collection(element))
    }

    /// Group matched elements by `key`, keeping `element` of each match.
    /// Both selectors are stored unevaluated.
    pub fn group_by(&mut self, key: Selector, element: Selector) -> Result<&mut Self, Error> {
        self.aggregator_factory(Arc::new(GroupByAggregatorFactory::new(key, element)))
    }

    /// Map every matched element through `selector`.
    pub fn project(&mut self, selector: Selector) -> Result<&mut Self, Error> {
        self.aggregator_factory(Arc::new(ProjectionAggregatorFactory::new(selector)))
    }

    // ------------------------------------------------------------------
    // Source pattern
    // ------------------------------------------------------------------

    /// Declare a new binding of `ty` and start the source pattern over it.
    pub fn pattern(
        &mut self,
        ty: DataType,
        name: Option<&str>,
    ) -> Result<&mut PatternBuilder, Error> {
        // checked before declaring so a rejected call leaves the scope untouched
        self.ensure_no_source()?;
        let declaration = self.scope.declare(ty, name)?;

        self.pattern_declaration(declaration)
    }

    /// Start the source pattern over an existing declaration.
    ///
    /// The declaration's name must not resolve to a different binding in
    /// this builder's scope.
    pub fn pattern_declaration(
        &mut self,
        declaration: Declaration,
    ) -> Result<&mut PatternBuilder, Error> {
        self.ensure_no_source()?;
        if let Some(existing) = self.scope.lookup(declaration.name())
            && existing != &declaration
        {
            return Err(ScopeError::DuplicateDeclaration {
                name: declaration.name().to_string(),
                scope: self.scope.path().to_string(),
            }
            .into());
        }

        record(ObsEvent::SourceDeclared {
            scope: self.scope.path().to_string(),
            declaration: declaration.name().to_string(),
            ty: declaration.data_type().clone(),
        });
        let pattern =
            PatternBuilder::new(&self.scope, declaration).with_config(self.config.clone());

        Ok(self.source.insert(pattern))
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    /// Validate the session and freeze it into an `AggregateElement`.
    ///
    /// Both completeness checks always run; the missing factory is reported
    /// first when both parts are absent.
    pub fn build(self) -> Result<AggregateElement, Error> {
        let Self {
            mut scope,
            result_type,
            factory,
            source,
            ..
        } = self;

        let (factory, source) = match (factory, source) {
            (Some(factory), Some(source)) => (factory, source),
            (factory, source) => {
                record(ObsEvent::BuildRejected {
                    scope: scope.path().to_string(),
                    missing_factory: factory.is_none(),
                    missing_source: source.is_none(),
                });
                let err = if factory.is_none() {
                    AggregateError::MissingFactory
                } else {
                    AggregateError::MissingSource
                };

                return Err(err.into());
            }
        };

        let source = source.build()?;

        // snapshot only after the source is built so its bindings are visible
        scope.adopt(std::iter::once(source.declaration().clone()));
        scope.adopt(source.declarations().iter().cloned());
        let declarations = scope.visible_declarations();

        record(ObsEvent::AggregateBuilt {
            scope: scope.path().to_string(),
            result_type: result_type.clone(),
            kind: factory.kind(),
            declarations: declarations.len(),
        });

        Ok(AggregateElement::new(
            declarations,
            result_type,
            factory,
            source,
        ))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    const fn ensure_no_source(&self) -> Result<(), AggregateError> {
        if self.source.is_some() {
            Err(AggregateError::SingleSource)
        } else {
            Ok(())
        }
    }

    fn reject_strategy(&self, descriptor: &TypeDescriptor, reason: &'static str) {
        record(ObsEvent::StrategyRejected {
            scope: self.scope.path().to_string(),
            name: descriptor.name().to_string(),
            reason,
        });
    }
}
