//! Service-level errors for capability registries and the registry directory.

use super::ValidationError;
use crate::extension::domain::{ActivationError, DescriptorSyntaxError, ExtensionId};
use thiserror::Error;

/// Result type for capability registry operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// Broad classification of an [`ExtensionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionErrorKind {
    /// The capability or its resources are declared incorrectly.
    Configuration,
    /// An implementation does not meet the capability's contract.
    Validation,
    /// An implementation could not be resolved or constructed.
    Activation,
}

/// Errors surfaced by capability registries and the registry directory.
#[derive(Debug, Clone, Error)]
pub enum ExtensionError {
    /// The capability has no capability descriptor.
    #[error("{capability}: capability descriptor is not declared")]
    MissingCapabilityDescriptor {
        /// Capability name.
        capability: &'static str,
    },

    /// The default implementation was requested but none is declared.
    #[error("{capability}: default extension identifier is not set")]
    DefaultIdentifierUnset {
        /// Capability name.
        capability: &'static str,
    },

    /// Another implementation already holds the identifier.
    #[error("{capability}: extension identifier '{identifier}' already registered; rejected {implementation}")]
    DuplicateIdentifier {
        /// Capability name.
        capability: &'static str,
        /// Contested identifier.
        identifier: ExtensionId,
        /// Rejected implementation type name.
        implementation: String,
    },

    /// A descriptor resource is malformed.
    #[error("{capability}: {source}")]
    DescriptorSyntax {
        /// Capability name.
        capability: &'static str,
        /// Offending resource line.
        source: DescriptorSyntaxError,
    },

    /// An implementation failed validation against the capability.
    #[error("{capability}: {source}")]
    Validation {
        /// Capability name.
        capability: &'static str,
        /// Validation failure.
        source: ValidationError,
    },

    /// An implementation could not be resolved or constructed.
    #[error("{capability}: failed to activate {target}: {source}")]
    Activation {
        /// Capability name.
        capability: &'static str,
        /// Identifier or type name being activated.
        target: String,
        /// Activation failure.
        source: ActivationError,
    },

    /// A process-wide directory has already been installed.
    #[error("the global registry directory is already installed")]
    GlobalDirectoryInstalled,

    /// No process-wide directory has been installed.
    #[error("the global registry directory is not installed")]
    GlobalDirectoryMissing,

    /// The directory holds a registry of an unexpected type for a capability.
    #[error("{capability}: registry directory entry has an unexpected type")]
    RegistryTypeMismatch {
        /// Capability name.
        capability: &'static str,
    },
}

impl ExtensionError {
    /// Returns the broad classification of the error.
    #[must_use]
    pub const fn kind(&self) -> ExtensionErrorKind {
        match self {
            Self::Validation { .. } => ExtensionErrorKind::Validation,
            Self::Activation { .. } => ExtensionErrorKind::Activation,
            Self::MissingCapabilityDescriptor { .. }
            | Self::DefaultIdentifierUnset { .. }
            | Self::DuplicateIdentifier { .. }
            | Self::DescriptorSyntax { .. }
            | Self::GlobalDirectoryInstalled
            | Self::GlobalDirectoryMissing
            | Self::RegistryTypeMismatch { .. } => ExtensionErrorKind::Configuration,
        }
    }
}
