use crate::{
    aggregate::RegistryError,
    config::ConfigError,
    rule::{
        builder::{AggregateError, PatternError},
        scope::ScopeError,
    },
};
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Stable classification for rule-definition failures.
/// Every failure is a programmer-error contract raised while a rule is being
/// defined; none are retried or recovered internally.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// A required part is missing or a strategy cannot be constructed.
    Configuration,

    /// The shape of the element being built would be violated.
    Structural,
}

///
/// Error
///
/// Crate-level error returned by every builder operation.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl Error {
    /// Return the stable classification of this failure.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Aggregate(err) => err.class(),
            Self::Pattern(_) | Self::Scope(_) => ErrorClass::Structural,
            Self::Config(_) | Self::Registry(_) => ErrorClass::Configuration,
        }
    }
}
