//! Module: rule::builder
//! Responsibility: mutable builder sessions that freeze into rule elements.
//! Does not own: aggregator runtime behavior or scope storage rules.
//! Boundary: user-facing fluent layer; every contract violation is returned
//! eagerly as an `Error`, and no partially built element is ever emitted.

mod aggregate;
mod pattern;


use crate::error::ErrorClass;
use thiserror::Error as ThisError;

// re-exports
pub use aggregate::AggregateBuilder;
pub use pattern::PatternBuilder;

///
/// AggregateError
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AggregateError {
    #[error("aggregator factory is already configured for aggregate in scope '{scope}'")]
    FactoryAlreadyConfigured { scope: String },

    #[error("aggregator factory is not provided")]
    MissingFactory,

    #[error("aggregate element source is not provided")]
    MissingSource,

    #[error(
        "aggregator type '{type_name}' has no zero-argument constructor; provide an aggregator factory explicitly"
    )]
    NoDefaultConstructor { type_name: String },

    #[error("type '{type_name}' must implement the aggregator capability")]
    NotAnAggregator { type_name: String },

    #[error("aggregate element can only have a single source")]
    SingleSource,
}

impl AggregateError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingFactory
            | Self::MissingSource
            | Self::NoDefaultConstructor { .. }
            | Self::NotAnAggregator { .. } => ErrorClass::Configuration,
            Self::FactoryAlreadyConfigured { .. } | Self::SingleSource => ErrorClass::Structural,
        }
    }
}

///
/// PatternError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PatternError {
    #[error("pattern element can only have a single source")]
    SingleSource,
}
