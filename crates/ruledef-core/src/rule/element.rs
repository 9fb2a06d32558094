use crate::{
    aggregate::SharedAggregatorFactory,
    rule::scope::{Declaration, Declarations},
    types::DataType,
    value::Value,
};
use serde::Serialize;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Contains,
}

///
/// Condition
///
/// One match condition on a pattern's fact: `<field> <op> <value>`.
/// Conditions are carried for the network compiler; they are not evaluated
/// while rules are being defined.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Condition {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Lt, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Gt, value)
    }
}

///
/// PatternElement
///
/// Immutable match node over one declared fact type.
/// `declarations` holds only the bindings the pattern introduced itself.
///

#[derive(Clone, Debug)]
pub struct PatternElement {
    declaration: Declaration,
    conditions: Vec<Condition>,
    declarations: Declarations,
    source: Option<Box<AggregateElement>>,
}

impl PatternElement {
    pub(crate) const fn new(
        declaration: Declaration,
        conditions: Vec<Condition>,
        declarations: Declarations,
        source: Option<Box<AggregateElement>>,
    ) -> Self {
        Self {
            declaration,
            conditions,
            declarations,
            source,
        }
    }

    #[must_use]
    pub const fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        self.declaration.data_type()
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub const fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    /// Aggregate feeding this pattern, when the pattern matches aggregation
    /// results instead of raw facts.
    #[must_use]
    pub fn source(&self) -> Option<&AggregateElement> {
        self.source.as_deref()
    }

    pub fn accept<V: ElementVisitor>(&self, visitor: &mut V) {
        visitor.visit_pattern(self);
        if let Some(source) = &self.source {
            source.accept(visitor);
        }
    }
}

///
/// AggregateElement
///
/// Immutable IR node: aggregate the matches of exactly one source pattern
/// through the strategy behind `factory`.
///
/// The node carries the factory but never invokes it; construction of the
/// aggregator belongs to the matching engine.
///

#[derive(Clone, Debug)]
pub struct AggregateElement {
    declarations: Declarations,
    result_type: DataType,
    factory: SharedAggregatorFactory,
    source: PatternElement,
}

impl AggregateElement {
    pub(crate) const fn new(
        declarations: Declarations,
        result_type: DataType,
        factory: SharedAggregatorFactory,
        source: PatternElement,
    ) -> Self {
        Self {
            declarations,
            result_type,
            factory,
            source,
        }
    }

    /// Declarations visible at this node, enclosing scope first.
    #[must_use]
    pub const fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    #[must_use]
    pub const fn result_type(&self) -> &DataType {
        &self.result_type
    }

    #[must_use]
    pub const fn factory(&self) -> &SharedAggregatorFactory {
        &self.factory
    }

    #[must_use]
    pub const fn source(&self) -> &PatternElement {
        &self.source
    }

    pub fn accept<V: ElementVisitor>(&self, visitor: &mut V) {
        visitor.visit_aggregate(self);
        self.source.accept(visitor);
    }
}

///
/// ElementVisitor
///
/// Read-only, pre-order traversal over built elements.
///

pub trait ElementVisitor {
    fn visit_pattern(&mut self, _pattern: &PatternElement) {}

    fn visit_aggregate(&mut self, _aggregate: &AggregateElement) {}
}
