//! Semantic types attached to declarations and aggregate results.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

///
/// DataType
///
/// Semantic type of a fact or of an aggregation result.
///
/// `DataType` is descriptive only: the IR layer compares and reports types,
/// it never checks a `Value` against one.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum DataType {
    /// Grouping bucket keyed by `key` holding elements of `element`.
    #[display("Group<{key}, {element}>")]
    Group {
        key: Box<Self>,
        element: Box<Self>,
    },

    /// Ordered sequence of `element`.
    #[display("List<{_0}>")]
    List(Box<Self>),

    /// Named fact type, e.g. `Order`.
    #[display("{_0}")]
    Named(Cow<'static, str>),
}

impl DataType {
    /// Build a named fact type.
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// Build the sequence type of `element`.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Build the group-by bucket type.
    #[must_use]
    pub fn group(key: Self, element: Self) -> Self {
        Self::Group {
            key: Box::new(key),
            element: Box::new(element),
        }
    }

    /// Return the element type of a sequence or group, if any.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::List(element) | Self::Group { element, .. } => Some(element.as_ref()),
            Self::Named(_) => None,
        }
    }
}

///
/// FactType
///
/// Compile-time binding between a Rust type and its semantic `DataType`.
///

pub trait FactType {
    const TYPE_NAME: &'static str;

    #[must_use]
    fn data_type() -> DataType {
        DataType::named(Self::TYPE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order;

    impl FactType for Order {
        const TYPE_NAME: &'static str = "Order";
    }

    #[test]
    fn display_renders_nested_types() {
        let ty = DataType::group(DataType::named("Text"), DataType::named("Order"));

        assert_eq!(ty.to_string(), "Group<Text, Order>");
        assert_eq!(DataType::list(Order::data_type()).to_string(), "List<Order>");
    }

    #[test]
    fn element_type_is_exposed_for_containers_only() {
        let list = DataType::list(DataType::named("Order"));

        assert_eq!(list.element(), Some(&DataType::named("Order")));
        assert_eq!(DataType::named("Order").element(), None);
    }
}
