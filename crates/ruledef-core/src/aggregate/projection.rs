use crate::{
    aggregate::{
        AggregationResult, Aggregator, AggregatorFactory, AggregatorKind, Fact, FactId, Selector,
    },
    value::Value,
};
use indexmap::IndexMap;
use std::any::Any;

///
/// ProjectionAggregatorFactory
///

#[derive(Clone, Debug)]
pub struct ProjectionAggregatorFactory {
    selector: Selector,
}

impl ProjectionAggregatorFactory {
    #[must_use]
    pub const fn new(selector: Selector) -> Self {
        Self { selector }
    }

    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl AggregatorFactory for ProjectionAggregatorFactory {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Projection
    }

    fn name(&self) -> &str {
        "ProjectionAggregator"
    }

    fn create(&self) -> Box<dyn Aggregator> {
        Box::new(ProjectionAggregator::new(self.selector.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// ProjectionAggregator
///
/// Maps every matched element to exactly one result element.
///

#[derive(Debug)]
pub struct ProjectionAggregator {
    selector: Selector,
    projected: IndexMap<FactId, Value>,
}

impl ProjectionAggregator {
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            projected: IndexMap::new(),
        }
    }
}

impl Aggregator for ProjectionAggregator {
    fn add(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        facts
            .iter()
            .map(|fact| {
                let value = self.selector.select(&fact.value);
                self.projected.insert(fact.id, value.clone());

                AggregationResult::added(value)
            })
            .collect()
    }

    fn modify(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut results = Vec::new();
        for fact in facts {
            if let Some(slot) = self.projected.get_mut(&fact.id) {
                *slot = self.selector.select(&fact.value);
                results.push(AggregationResult::modified(slot.clone()));
            }
        }

        results
    }

    fn remove(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        facts
            .iter()
            .filter_map(|fact| self.projected.shift_remove(&fact.id))
            .map(AggregationResult::removed)
            .collect()
    }

    fn aggregates(&self) -> Vec<Value> {
        self.projected.values().cloned().collect()
    }
}
