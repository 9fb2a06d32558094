use crate::{
    config::BuilderConfig,
    error::Error,
    obs::{ObsEvent, sink::record},
    rule::{
        builder::{AggregateBuilder, PatternError},
        element::{Condition, PatternElement},
        scope::{Declaration, Scope},
    },
    types::DataType,
};

/// Label of the scope a pattern builder derives from its parent.
const PATTERN_SCOPE: &str = "Pattern";

///
/// PatternBuilder
///
/// Builder session for one `PatternElement` matching facts bound to
/// `declaration`. A pattern may be fed by one aggregate instead of raw facts.
///

#[derive(Debug)]
pub struct PatternBuilder {
    scope: Scope,
    declaration: Declaration,
    conditions: Vec<Condition>,
    source: Option<Box<AggregateBuilder>>,
    config: BuilderConfig,
}

impl PatternBuilder {
    /// Start a pattern over `declaration` in a child of `parent`.
    #[must_use]
    pub fn new(parent: &Scope, declaration: Declaration) -> Self {
        Self {
            scope: parent.child(PATTERN_SCOPE),
            declaration,
            conditions: Vec::new(),
            source: None,
            config: BuilderConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Append a match condition.
    pub fn condition(&mut self, condition: Condition) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    /// Declare a binding local to this pattern.
    pub fn declare(&mut self, ty: DataType, name: Option<&str>) -> Result<Declaration, Error> {
        Ok(self.scope.declare(ty, name)?)
    }

    /// Feed this pattern from a new aggregate producing `result_type`.
    pub fn aggregate(&mut self, result_type: DataType) -> Result<&mut AggregateBuilder, Error> {
        if self.source.is_some() {
            return Err(PatternError::SingleSource.into());
        }
        let builder =
            AggregateBuilder::new(result_type, &self.scope).with_config(self.config.clone());

        Ok(self.source.insert(Box::new(builder)).as_mut())
    }

    pub fn source_mut(&mut self) -> Option<&mut AggregateBuilder> {
        self.source.as_deref_mut()
    }

    /// Freeze the pattern, building its aggregate source first if present.
    pub fn build(self) -> Result<PatternElement, Error> {
        let source = match self.source {
            Some(builder) => Some(Box::new(builder.build()?)),
            None => None,
        };

        record(ObsEvent::PatternBuilt {
            scope: self.scope.path().to_string(),
            declaration: self.declaration.name().to_string(),
            conditions: self.conditions.len(),
        });

        Ok(PatternElement::new(
            self.declaration,
            self.conditions,
            self.scope.own_declarations().iter().cloned().collect(),
            source,
        ))
    }
}
