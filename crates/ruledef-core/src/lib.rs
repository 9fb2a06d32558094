//! Core of ruledef: rule-definition IR elements, the builders that produce
//! them, and the aggregator contract those elements carry.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod aggregate;
pub mod config;
pub mod error;
pub mod obs;
pub mod rule;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No sinks, registries, or config loaders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        aggregate::{Aggregator, AggregatorFactory, Fact, Selector},
        rule::{
            AggregateBuilder, AggregateElement, Condition, Declaration, PatternBuilder,
            PatternElement, Scope,
        },
        types::{DataType, FactType},
        value::Value,
    };
}
