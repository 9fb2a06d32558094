//! Module: value
//! Responsibility: dynamic fact payloads consumed by aggregators and selectors.
//! Does not own: semantic typing (see `types`) or condition evaluation.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Value
///
/// Dynamic payload carried by a fact or produced by an aggregator.
///
/// Record  → named fields of a fact; field order is canonical (sorted).
/// List    → ordered sequence; order is preserved exactly as produced.
/// Group   → one group-by bucket: the grouping key plus its elements.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Bool(bool),
    Group {
        key: Box<Self>,
        elements: Vec<Self>,
    },
    Int(i64),
    List(Vec<Self>),
    Null,
    Record(BTreeMap<String, Self>),
    Text(String),
    Uint(u64),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::Record` from `(field, value)` pairs.
    ///
    /// Later pairs overwrite earlier pairs with the same field name.
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::Group` bucket.
    #[must_use]
    pub fn group(key: Self, elements: Vec<Self>) -> Self {
        Self::Group {
            key: Box::new(key),
            elements,
        }
    }

    ///
    /// ACCESSORS
    ///

    /// Look up a named field on a record value.
    ///
    /// Returns `None` for non-record values and for missing fields.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Return true when this value has no nested values.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Group { .. } | Self::List(_) | Self::Record(_))
    }
}

// impl_from_for
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool    => Bool,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    u8      => Uint,
    u16     => Uint,
    u32     => Uint,
    u64     => Uint,
    &str    => Text,
    String  => Text,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
