//! Registry identifier of an extension within one capability.

use super::{ExtensionDomainError, ImplementationDescriptor, QualifiedTypeName};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Key under which an implementation is registered and looked up.
///
/// Identifiers are unique within a single capability registry. They come from
/// [`ImplementationDescriptor::identifier`] when declared, otherwise from the
/// implementation's bare type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Creates a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionDomainError::EmptyIdentifier`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ExtensionDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExtensionDomainError::EmptyIdentifier);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Resolves the identifier of an implementation.
    ///
    /// A declared, non-blank descriptor identifier wins; otherwise the bare
    /// type name is used.
    #[must_use]
    pub fn resolve(
        type_name: &QualifiedTypeName,
        descriptor: Option<&ImplementationDescriptor>,
    ) -> Self {
        descriptor
            .and_then(ImplementationDescriptor::identifier)
            .and_then(|declared| Self::new(declared).ok())
            .unwrap_or_else(|| Self(type_name.bare_name().to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExtensionId {
    type Error = ExtensionDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExtensionId> for String {
    fn from(value: ExtensionId) -> Self {
        value.0
    }
}

impl Borrow<str> for ExtensionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExtensionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
