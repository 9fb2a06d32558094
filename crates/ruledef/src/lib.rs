//! ## Crate layout
//! - `core`: rule-definition IR elements, builders, scopes, and the
//!   aggregator contract.
//!
//! The `prelude` module mirrors the surface used while defining rules.

pub use ruledef_core as core;

/// re-exports
///
/// downstream rule compilers can name these without adding the
/// dependencies to their own Cargo.toml
pub mod __reexports {
    pub use serde;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{Error, ErrorClass};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        aggregate::{
            Aggregator as _, AggregatorFactory as _, CustomAggregatorFactory, Fact, Selector,
            TypeDescriptor,
        },
        config::BuilderConfig,
        rule::{AggregateBuilder, AggregateElement, Condition, PatternBuilder, Scope},
        types::{DataType, FactType},
        value::Value,
    };
}
