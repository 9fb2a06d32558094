use crate::{
    aggregate::{AggregationResult, Aggregator, Fact, FactId},
    types::DataType,
    value::Value,
};
use indexmap::IndexMap;

///
/// CollectionAggregator
///
/// Collects matched elements into one sequence result.
///
/// The sequence is produced on the first non-empty add and then only ever
/// modified; it stays in the result set even when it becomes empty.
/// Element order is insertion order and survives `modify`.
///

#[derive(Clone, Debug)]
pub struct CollectionAggregator {
    element: DataType,
    items: IndexMap<FactId, Value>,
    produced: bool,
}

impl CollectionAggregator {
    #[must_use]
    pub fn new(element: DataType) -> Self {
        Self {
            element,
            items: IndexMap::new(),
            produced: false,
        }
    }

    #[must_use]
    pub const fn element_type(&self) -> &DataType {
        &self.element
    }

    fn sequence(&self) -> Value {
        Value::List(self.items.values().cloned().collect())
    }
}

impl Aggregator for CollectionAggregator {
    fn add(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        if facts.is_empty() {
            return Vec::new();
        }

        for fact in facts {
            self.items.insert(fact.id, fact.value.clone());
        }

        if self.produced {
            vec![AggregationResult::modified(self.sequence())]
        } else {
            self.produced = true;
            vec![AggregationResult::added(self.sequence())]
        }
    }

    fn modify(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut changed = false;
        for fact in facts {
            if let Some(slot) = self.items.get_mut(&fact.id) {
                slot.clone_from(&fact.value);
                changed = true;
            }
        }

        if changed {
            vec![AggregationResult::modified(self.sequence())]
        } else {
            Vec::new()
        }
    }

    fn remove(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut changed = false;
        for fact in facts {
            // shift_remove keeps the remaining elements in insertion order
            changed |= self.items.shift_remove(&fact.id).is_some();
        }

        if changed {
            vec![AggregationResult::modified(self.sequence())]
        } else {
            Vec::new()
        }
    }

    fn aggregates(&self) -> Vec<Value> {
        if self.produced {
            vec![self.sequence()]
        } else {
            Vec::new()
        }
    }
}
