use crate::{
    aggregate::{
        AggregationAction, AggregationResult, Aggregator, AggregatorFactory, AggregatorKind, Fact,
        FactId, Selector,
    },
    value::Value,
};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;

///
/// GroupByAggregatorFactory
///
/// Carries the key and element selectors, unevaluated, for every
/// `GroupByAggregator` it creates.
///

#[derive(Clone, Debug)]
pub struct GroupByAggregatorFactory {
    key: Selector,
    element: Selector,
}

impl GroupByAggregatorFactory {
    #[must_use]
    pub const fn new(key: Selector, element: Selector) -> Self {
        Self { key, element }
    }

    #[must_use]
    pub const fn key_selector(&self) -> &Selector {
        &self.key
    }

    #[must_use]
    pub const fn element_selector(&self) -> &Selector {
        &self.element
    }
}

impl AggregatorFactory for GroupByAggregatorFactory {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::GroupBy
    }

    fn name(&self) -> &str {
        "GroupByAggregator"
    }

    fn create(&self) -> Box<dyn Aggregator> {
        Box::new(GroupByAggregator::new(self.key.clone(), self.element.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// GroupByAggregator
///
/// Buckets matched elements by key; every non-empty bucket is one result
/// (`Value::Group`). Buckets and their elements keep insertion order.
///

#[derive(Debug)]
pub struct GroupByAggregator {
    key: Selector,
    element: Selector,
    groups: IndexMap<Value, IndexMap<FactId, Value>>,
    fact_keys: HashMap<FactId, Value>,
}

impl GroupByAggregator {
    #[must_use]
    pub fn new(key: Selector, element: Selector) -> Self {
        Self {
            key,
            element,
            groups: IndexMap::new(),
            fact_keys: HashMap::new(),
        }
    }

    fn insert(&mut self, fact: &Fact, changes: &mut Changes) {
        let key = self.key.select(&fact.value);
        let element = self.element.select(&fact.value);

        let action = if self.groups.contains_key(&key) {
            AggregationAction::Modified
        } else {
            AggregationAction::Added
        };
        self.groups
            .entry(key.clone())
            .or_default()
            .insert(fact.id, element);
        self.fact_keys.insert(fact.id, key.clone());

        changes.mark(key, action);
    }

    fn detach(&mut self, id: FactId, changes: &mut Changes) -> bool {
        let Some(key) = self.fact_keys.remove(&id) else {
            return false;
        };
        let Some(group) = self.groups.get_mut(&key) else {
            return false;
        };

        group.shift_remove(&id);
        if group.is_empty() {
            self.groups.shift_remove(&key);
            changes.mark(key, AggregationAction::Removed);
        } else {
            changes.mark(key, AggregationAction::Modified);
        }

        true
    }

    fn group_value(&self, key: &Value) -> Value {
        let elements = self
            .groups
            .get(key)
            .map(|group| group.values().cloned().collect())
            .unwrap_or_default();

        Value::group(key.clone(), elements)
    }

    fn results(&self, changes: Changes) -> Vec<AggregationResult> {
        changes
            .0
            .into_iter()
            .map(|(key, action)| AggregationResult {
                action,
                aggregate: self.group_value(&key),
            })
            .collect()
    }
}

impl Aggregator for GroupByAggregator {
    fn add(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut changes = Changes::default();
        for fact in facts {
            self.insert(fact, &mut changes);
        }

        self.results(changes)
    }

    fn modify(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut changes = Changes::default();
        for fact in facts {
            if self.detach(fact.id, &mut changes) {
                self.insert(fact, &mut changes);
            }
        }

        self.results(changes)
    }

    fn remove(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut changes = Changes::default();
        for fact in facts {
            self.detach(fact.id, &mut changes);
        }

        self.results(changes)
    }

    fn aggregates(&self) -> Vec<Value> {
        self.groups.keys().map(|key| self.group_value(key)).collect()
    }
}

///
/// Changes
///
/// Net per-group change accumulated over one batch.
///

#[derive(Default)]
struct Changes(IndexMap<Value, AggregationAction>);

impl Changes {
    fn mark(&mut self, key: Value, action: AggregationAction) {
        use AggregationAction::{Added, Modified, Removed};

        let Some(previous) = self.0.get(&key).copied() else {
            self.0.insert(key, action);
            return;
        };

        let net = match (previous, action) {
            // a group created and emptied in the same batch was never observed
            (Added, Removed) => None,
            (Added, _) => Some(Added),
            (Removed, Added) | (Modified, Added | Modified) => Some(Modified),
            (_, Removed) | (Removed, Modified) => Some(Removed),
        };

        match net {
            Some(net) => {
                self.0.insert(key, net);
            }
            None => {
                self.0.shift_remove(&key);
            }
        }
    }
}
