//! Validated implementation type name.

use super::ExtensionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified, dotted name of a concrete implementation type.
///
/// Characters follow Unicode Standard Annex #31 with `$` added: the first
/// character must be `XID_Start`, `_` or `$`, and every following character
/// must be `XID_Continue`, `$` or `.`. Names such as `codec.json.JsonCodec` or
/// `codec.Outer$Inner` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedTypeName(String);

impl QualifiedTypeName {
    /// Creates a validated type name.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionDomainError::EmptyTypeName`] when the value is empty
    /// after trimming, or [`ExtensionDomainError::InvalidTypeName`] when it is
    /// not a dotted identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, ExtensionDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ExtensionDomainError::EmptyTypeName);
        }

        if !is_dotted_identifier(trimmed) {
            return Err(ExtensionDomainError::InvalidTypeName(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the full type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the unqualified name of the type.
    ///
    /// This is the segment after the last `.`, narrowed to the segment after
    /// the last `$` for nested names. The full name is returned when that
    /// segment is empty.
    #[must_use]
    pub fn bare_name(&self) -> &str {
        let simple = self
            .0
            .rsplit(['.', '$'])
            .next()
            .unwrap_or_default();
        if simple.is_empty() { &self.0 } else { simple }
    }
}

fn is_dotted_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first) && chars.all(|c| c == '.' || is_identifier_part(c))
}

fn is_identifier_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '$'
}

impl TryFrom<String> for QualifiedTypeName {
    type Error = ExtensionDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualifiedTypeName> for String {
    fn from(value: QualifiedTypeName) -> Self {
        value.0
    }
}

impl AsRef<str> for QualifiedTypeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for QualifiedTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
