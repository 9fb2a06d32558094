use crate::{
    aggregate::{Aggregator, AggregatorConstructor, AggregatorKind, CollectionAggregator},
    types::DataType,
};
use std::{
    any::{TypeId, type_name},
    borrow::Cow,
    collections::BTreeMap,
    fmt,
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("type '{name}' is already registered")]
    DuplicateType { name: String },

    #[error("type '{name}' is not registered")]
    UnknownType { name: String },
}

///
/// AggregatorCapability
///
/// Proof that a type satisfies the aggregator contract, plus its
/// zero-argument construction path when it has one.
///

#[derive(Clone)]
pub struct AggregatorCapability {
    kind: AggregatorKind,
    constructor: Option<AggregatorConstructor>,
}

impl AggregatorCapability {
    #[must_use]
    pub const fn kind(&self) -> AggregatorKind {
        self.kind
    }

    #[must_use]
    pub const fn constructor(&self) -> Option<&AggregatorConstructor> {
        self.constructor.as_ref()
    }
}

impl fmt::Debug for AggregatorCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregatorCapability")
            .field("kind", &self.kind)
            .field("default_constructible", &self.constructor.is_some())
            .finish()
    }
}

///
/// TypeDescriptor
///
/// Runtime descriptor for a candidate aggregator type.
///
/// Statically known types build their descriptor through the generic
/// constructors, so capability and constructibility come from trait bounds.
/// Late-bound types are looked up by name in an `AggregatorRegistry`.
///

#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    type_id: Option<TypeId>,
    capability: Option<AggregatorCapability>,
}

impl TypeDescriptor {
    /// Describe an arbitrary type with no aggregator capability.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            name: Cow::Borrowed(type_name::<T>()),
            type_id: Some(TypeId::of::<T>()),
            capability: None,
        }
    }

    /// Describe a default-constructible aggregator type.
    #[must_use]
    pub fn aggregator<A>() -> Self
    where
        A: Aggregator + Default + 'static,
    {
        Self {
            name: Cow::Borrowed(type_name::<A>()),
            type_id: Some(TypeId::of::<A>()),
            capability: Some(AggregatorCapability {
                kind: AggregatorKind::Custom,
                constructor: Some(Arc::new(|| Box::new(A::default()) as Box<dyn Aggregator>)),
            }),
        }
    }

    /// Describe an aggregator type that requires constructor arguments.
    #[must_use]
    pub fn aggregator_with_args<A>() -> Self
    where
        A: Aggregator + 'static,
    {
        Self {
            name: Cow::Borrowed(type_name::<A>()),
            type_id: Some(TypeId::of::<A>()),
            capability: Some(AggregatorCapability {
                kind: AggregatorKind::Custom,
                constructor: None,
            }),
        }
    }

    /// Synthesize the collection aggregator type for `element`.
    #[must_use]
    pub fn collection(element: DataType) -> Self {
        let name = format!("CollectionAggregator<{element}>");

        Self {
            name: Cow::Owned(name),
            type_id: Some(TypeId::of::<CollectionAggregator>()),
            capability: Some(AggregatorCapability {
                kind: AggregatorKind::Collection,
                constructor: Some(Arc::new(move || {
                    Box::new(CollectionAggregator::new(element.clone())) as Box<dyn Aggregator>
                })),
            }),
        }
    }

    /// Describe a late-bound type by name and optional capability.
    #[must_use]
    pub fn late_bound(
        name: impl Into<Cow<'static, str>>,
        capability: Option<(AggregatorKind, Option<AggregatorConstructor>)>,
    ) -> Self {
        Self {
            name: name.into(),
            type_id: None,
            capability: capability.map(|(kind, constructor)| AggregatorCapability {
                kind,
                constructor,
            }),
        }
    }

    /// Replace the diagnostic name.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    #[must_use]
    pub const fn capability(&self) -> Option<&AggregatorCapability> {
        self.capability.as_ref()
    }
}

///
/// AggregatorRegistry
///
/// Name-keyed descriptors for aggregator types that are only known at runtime.
///

#[derive(Clone, Debug, Default)]
pub struct AggregatorRegistry {
    types: BTreeMap<String, TypeDescriptor>,
}

impl AggregatorRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register a descriptor under its own name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<(), RegistryError> {
        let name = descriptor.name().to_string();
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateType { name });
        }

        self.types.insert(name, descriptor);

        Ok(())
    }

    /// Look up a descriptor by name.
    pub fn lookup(&self, name: &str) -> Result<&TypeDescriptor, RegistryError> {
        self.types
            .get(name)
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
