//! Module: aggregate
//! Responsibility: the aggregator runtime contract and the factories that
//! defer aggregator construction until the matching engine needs one.
//! Does not own: IR assembly (see `rule::builder`) or fact propagation.
//! Boundary: IR nodes carry `SharedAggregatorFactory`; only the engine calls
//! `AggregatorFactory::create`.

mod collection;
mod descriptor;
mod factory;
mod group_by;
mod projection;
mod selector;


use crate::value::Value;
use derive_more::Display;
use std::fmt;

// re-exports
pub use collection::CollectionAggregator;
pub use descriptor::{AggregatorCapability, AggregatorRegistry, RegistryError, TypeDescriptor};
pub use factory::{
    AggregatorConstructor, AggregatorFactory, CustomAggregatorFactory, DefaultAggregatorFactory,
    SharedAggregatorFactory,
};
pub use group_by::{GroupByAggregator, GroupByAggregatorFactory};
pub use projection::{ProjectionAggregator, ProjectionAggregatorFactory};
pub use selector::{Selector, SelectorFn};

///
/// AggregatorKind
///
/// Strategy family of an aggregator factory.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum AggregatorKind {
    Collection,
    Custom,
    GroupBy,
    Projection,
}

///
/// FactId
///
/// Engine-assigned identity of a matched fact.
/// Modify and remove calls are matched to earlier adds by id.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct FactId(pub u64);

///
/// Fact
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fact {
    pub id: FactId,
    pub value: Value,
}

impl Fact {
    #[must_use]
    pub fn new(id: u64, value: impl Into<Value>) -> Self {
        Self {
            id: FactId(id),
            value: value.into(),
        }
    }
}

///
/// AggregationAction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AggregationAction {
    Added,
    Modified,
    Removed,
}

///
/// AggregationResult
///
/// One change to the aggregator's output set.
/// For `Removed`, `aggregate` is the final state of the retracted result.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregationResult {
    pub action: AggregationAction,
    pub aggregate: Value,
}

impl AggregationResult {
    #[must_use]
    pub const fn added(aggregate: Value) -> Self {
        Self {
            action: AggregationAction::Added,
            aggregate,
        }
    }

    #[must_use]
    pub const fn modified(aggregate: Value) -> Self {
        Self {
            action: AggregationAction::Modified,
            aggregate,
        }
    }

    #[must_use]
    pub const fn removed(aggregate: Value) -> Self {
        Self {
            action: AggregationAction::Removed,
            aggregate,
        }
    }
}

///
/// Aggregator
///
/// Runtime strategy that consumes matched facts incrementally and maintains
/// zero-or-more result facts.
///
/// Each call returns the changes to the result set caused by that batch.
/// Facts passed to `modify` or `remove` that were never added are ignored.
///

pub trait Aggregator: fmt::Debug + Send {
    fn add(&mut self, facts: &[Fact]) -> Vec<AggregationResult>;

    fn modify(&mut self, facts: &[Fact]) -> Vec<AggregationResult>;

    fn remove(&mut self, facts: &[Fact]) -> Vec<AggregationResult>;

    /// Current result set, in the order results were first produced.
    fn aggregates(&self) -> Vec<Value>;
}
