//! Module: rule
//! Responsibility: rule-definition IR nodes, their builders, and naming scopes.
//! Does not own: compilation of elements into a matching network.
//! Boundary: builders are mutable sessions; elements are immutable once built.

pub mod builder;
pub mod element;
pub mod scope;

// re-exports
pub use builder::{AggregateBuilder, AggregateError, PatternBuilder, PatternError};
pub use element::{AggregateElement, CompareOp, Condition, ElementVisitor, PatternElement};
pub use scope::{Declaration, Declarations, Scope, ScopeError};
