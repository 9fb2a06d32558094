use crate::{
    aggregate::{AggregationResult, Aggregator, Fact},
    obs::{EventSink, ObsEvent},
    types::{DataType, FactType},
    value::Value,
};
use std::cell::RefCell;

/// Root scope label used by core tests.
pub(crate) const TEST_RULE_SCOPE: &str = "Rule";

///
/// Order
///
/// Shared test-only fact type.
///

pub(crate) struct Order;

impl FactType for Order {
    const TYPE_NAME: &'static str = "Order";
}

/// Build an `Order` fact record.
pub(crate) fn order(id: u64, category: &str, amount: i64) -> Fact {
    Fact::new(
        id,
        Value::record([
            ("id", Value::from(id)),
            ("category", Value::from(category)),
            ("amount", Value::from(amount)),
        ]),
    )
}

pub(crate) fn order_type() -> DataType {
    Order::data_type()
}

///
/// RecordingSink
///
/// Test-only sink that keeps every event in order.
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: RefCell<Vec<ObsEvent>>,
}

impl EventSink for RecordingSink {
    fn record(&self, event: &ObsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

///
/// CountingAggregator
///
/// Default-constructible aggregator: one `Uint` result holding the number of
/// facts currently aggregated.
///

#[derive(Debug, Default)]
pub(crate) struct CountingAggregator {
    count: u64,
}

impl Aggregator for CountingAggregator {
    fn add(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let first = self.count == 0;
        self.count += facts.len() as u64;

        if first {
            vec![AggregationResult::added(Value::Uint(self.count))]
        } else {
            vec![AggregationResult::modified(Value::Uint(self.count))]
        }
    }

    fn modify(&mut self, _: &[Fact]) -> Vec<AggregationResult> {
        Vec::new()
    }

    fn remove(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        self.count = self.count.saturating_sub(facts.len() as u64);

        vec![AggregationResult::modified(Value::Uint(self.count))]
    }

    fn aggregates(&self) -> Vec<Value> {
        vec![Value::Uint(self.count)]
    }
}

///
/// ThresholdAggregator
///
/// Aggregator that needs a constructor argument, so it has no
/// zero-argument construction path.
///

#[derive(Debug)]
pub(crate) struct ThresholdAggregator {
    threshold: i64,
    matched: Vec<Value>,
}

impl ThresholdAggregator {
    pub(crate) const fn new(threshold: i64) -> Self {
        Self {
            threshold,
            matched: Vec::new(),
        }
    }
}

impl Aggregator for ThresholdAggregator {
    fn add(&mut self, facts: &[Fact]) -> Vec<AggregationResult> {
        let mut results = Vec::new();
        for fact in facts {
            if let Some(Value::Int(amount)) = fact.value.field("amount")
                && *amount >= self.threshold
            {
                self.matched.push(fact.value.clone());
                results.push(AggregationResult::added(fact.value.clone()));
            }
        }

        results
    }

    fn modify(&mut self, _: &[Fact]) -> Vec<AggregationResult> {
        Vec::new()
    }

    fn remove(&mut self, _: &[Fact]) -> Vec<AggregationResult> {
        Vec::new()
    }

    fn aggregates(&self) -> Vec<Value> {
        self.matched.clone()
    }
}
