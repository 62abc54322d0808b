//! Error types for extension domain validation, parsing and activation.

use super::QualifiedTypeName;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while constructing extension domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionDomainError {
    /// The implementation type name is empty after trimming.
    #[error("implementation type name must not be empty")]
    EmptyTypeName,

    /// The implementation type name is not a dotted identifier.
    #[error("implementation type name '{0}' is not a valid dotted identifier")]
    InvalidTypeName(String),

    /// The extension identifier is empty after trimming.
    #[error("extension identifier must not be empty")]
    EmptyIdentifier,
}

/// Malformed line in a descriptor resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorSyntaxError {
    /// The entry contains a space or tab between non-blank characters.
    #[error("{location}:{line_number}: illegal descriptor syntax: {line}")]
    EmbeddedWhitespace {
        /// Resource the line was read from.
        location: String,
        /// One-based line number within the resource.
        line_number: usize,
        /// Entry after comment stripping and trimming.
        line: String,
    },

    /// The entry is not a valid implementation type name.
    #[error("{location}:{line_number}: illegal implementation type name: {line}")]
    IllegalTypeName {
        /// Resource the line was read from.
        location: String,
        /// One-based line number within the resource.
        line_number: usize,
        /// Entry after comment stripping and trimming.
        line: String,
    },
}

/// Result type for type resolution and instantiation.
pub type ActivationResult<T> = Result<T, ActivationError>;

/// Errors returned while resolving or constructing implementation types.
#[derive(Debug, Clone, Error)]
pub enum ActivationError {
    /// No type is known under the requested name.
    #[error("unknown implementation type: {0}")]
    UnknownType(QualifiedTypeName),

    /// The type does not satisfy the requested capability.
    #[error("{implementation} does not implement {capability}")]
    NotAssignable {
        /// Implementation type name.
        implementation: QualifiedTypeName,
        /// Requested capability type.
        capability: &'static str,
    },

    /// The type has no zero-argument constructor.
    #[error("{0} has no zero-argument constructor")]
    NoConstructor(QualifiedTypeName),

    /// The constructor ran and reported a failure.
    #[error("constructor of {implementation} failed: {source}")]
    ConstructorFailed {
        /// Implementation type name.
        implementation: QualifiedTypeName,
        /// Failure reported by the constructor.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}
