//! Module: rule::scope
//! Responsibility: hierarchical naming scopes and the declarations they hold.
//! Does not own: type checking of declarations or expression resolution.
//! Boundary: builders derive child scopes; emitted elements carry snapshots.

#[cfg(test)]
mod tests;

use crate::types::DataType;
use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Separator between scope labels in a scope path.
pub const SCOPE_SEPARATOR: char = '/';

///
/// ScopeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ScopeError {
    #[error("declaration '{name}' already exists in scope '{scope}'")]
    DuplicateDeclaration { name: String, scope: String },

    #[error("declaration name must not be empty")]
    EmptyName,
}

///
/// Declaration
///
/// Named, typed binding introduced by a pattern.
/// `scope` is the path of the scope the binding was declared in.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Declaration {
    name: String,
    ty: DataType,
    scope: String,
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        &self.ty
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Fully qualified name, `<scope>/<name>`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}{SCOPE_SEPARATOR}{}", self.scope, self.name)
    }
}

///
/// Declarations
///
/// Ordered declaration list; enclosing-scope bindings come first.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct Declarations(Vec<Declaration>);

impl Declarations {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Find a declaration by its short name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.0.iter().find(|d| d.name == name)
    }

    /// Return the short names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Declaration::name).collect()
    }
}

impl FromIterator<Declaration> for Declarations {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// Scope
///
/// One level of the naming hierarchy.
///
/// A child scope snapshots the declarations visible in its parent when it is
/// derived; declarations made in the child never leak back to the parent
/// unless the parent explicitly adopts them.
///

#[derive(Clone, Debug)]
pub struct Scope {
    path: String,
    inherited: Declarations,
    declarations: Vec<Declaration>,
}

impl Scope {
    /// Create a root scope with no visible declarations.
    #[must_use]
    pub fn root(label: &str) -> Self {
        Self {
            path: label.to_string(),
            inherited: Declarations::new(),
            declarations: Vec::new(),
        }
    }

    /// Derive a nested scope that sees everything currently visible here.
    #[must_use]
    pub fn child(&self, label: &str) -> Self {
        Self {
            path: format!("{}{SCOPE_SEPARATOR}{label}", self.path),
            inherited: self.visible_declarations(),
            declarations: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declare a new binding in this scope.
    ///
    /// Unnamed bindings receive a generated `$var<n>$` name that is unique
    /// among the visible declarations.
    pub fn declare(
        &mut self,
        ty: DataType,
        name: Option<&str>,
    ) -> Result<Declaration, ScopeError> {
        let name = match name {
            Some("") => return Err(ScopeError::EmptyName),
            Some(name) => {
                if self.lookup(name).is_some() {
                    return Err(ScopeError::DuplicateDeclaration {
                        name: name.to_string(),
                        scope: self.path.clone(),
                    });
                }
                name.to_string()
            }
            None => self.generate_name(),
        };

        let declaration = Declaration {
            name,
            ty,
            scope: self.path.clone(),
        };
        self.declarations.push(declaration.clone());

        Ok(declaration)
    }

    /// Adopt declarations produced by a nested builder.
    ///
    /// Declarations already visible here are skipped, so adopting a child's
    /// full visible set is idempotent.
    pub fn adopt<I>(&mut self, declarations: I)
    where
        I: IntoIterator<Item = Declaration>,
    {
        for declaration in declarations {
            let visible = self
                .visible()
                .any(|d| d.name == declaration.name && d.scope == declaration.scope);
            if !visible {
                self.declarations.push(declaration);
            }
        }
    }

    /// Resolve a visible declaration by short name. Inner scopes shadow outer.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.visible().rev().find(|d| d.name == name)
    }

    /// Declarations made directly in this scope, in declaration order.
    #[must_use]
    pub fn own_declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Snapshot of every declaration visible at this point.
    #[must_use]
    pub fn visible_declarations(&self) -> Declarations {
        self.visible().cloned().collect()
    }

    fn visible(&self) -> impl DoubleEndedIterator<Item = &Declaration> {
        self.inherited.iter().chain(self.declarations.iter())
    }

    fn generate_name(&self) -> String {
        let mut index = self.inherited.len() + self.declarations.len() + 1;
        loop {
            let candidate = format!("$var{index}$");
            if self.lookup(&candidate).is_none() {
                return candidate;
            }
            index += 1;
        }
    }
}
