//! Declarative metadata attached to capabilities and implementations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Metadata declared once per capability.
///
/// The default identifier names the implementation returned by a
/// parameterless lookup. The singleton policy selects between one cached
/// instance per identifier and a fresh instance per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    default_identifier: String,
    singleton: bool,
}

impl CapabilityDescriptor {
    /// Creates a descriptor whose instances are cached per identifier.
    #[must_use]
    pub fn singleton(default_identifier: impl Into<String>) -> Self {
        Self {
            default_identifier: default_identifier.into(),
            singleton: true,
        }
    }

    /// Creates a descriptor whose instances are constructed per request.
    #[must_use]
    pub fn prototype(default_identifier: impl Into<String>) -> Self {
        Self {
            default_identifier: default_identifier.into(),
            singleton: false,
        }
    }

    /// Returns the default identifier, or `None` when it is blank.
    #[must_use]
    pub fn default_identifier(&self) -> Option<&str> {
        let value = self.default_identifier.trim();
        (!value.is_empty()).then_some(value)
    }

    /// Returns whether instances are cached per identifier.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.singleton
    }
}

/// Metadata declared on a concrete implementation type.
///
/// Every field is optional in spirit: a blank identifier falls back to the
/// type's bare name, the order defaults to `0`, and no categories means the
/// implementation only shows up in unfiltered listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementationDescriptor {
    identifier: Option<String>,
    order: i32,
    categories: BTreeSet<String>,
}

impl ImplementationDescriptor {
    /// Creates a descriptor with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the sort order used by multi-result queries.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Adds category tags.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Returns the declared identifier, or `None` when it is unset or blank.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the sort order.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns the category tags.
    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Returns whether the descriptor carries `category`.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}
