//! Structural validation of implementation types against a capability.

use crate::extension::domain::{Capability, ImplementationType, QualifiedTypeName};
use thiserror::Error;

/// Reasons an implementation type is not admitted to a capability registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The type does not satisfy the capability.
    #[error("{implementation} does not implement {capability}")]
    NotAssignable {
        /// Implementation type name.
        implementation: QualifiedTypeName,
        /// Capability type.
        capability: &'static str,
    },

    /// The type has no zero-argument constructor.
    #[error("{0} has no zero-argument constructor")]
    MissingDefaultConstructor(QualifiedTypeName),
}

/// Checks that an implementation type can serve capability `T`.
///
/// Discovery and manual registration both run every check: manual
/// registration never passes through descriptor resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplementationValidator;

impl ImplementationValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates `implementation` against capability `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAssignable`] when the type does not
    /// satisfy `T`, or [`ValidationError::MissingDefaultConstructor`] when it
    /// declares no zero-argument constructor.
    pub fn validate<T>(&self, implementation: &ImplementationType) -> Result<(), ValidationError>
    where
        T: Capability + ?Sized,
    {
        if !implementation.satisfies::<T>() {
            return Err(ValidationError::NotAssignable {
                implementation: implementation.name().clone(),
                capability: T::NAME,
            });
        }

        if !implementation.has_default_constructor() {
            return Err(ValidationError::MissingDefaultConstructor(
                implementation.name().clone(),
            ));
        }

        Ok(())
    }
}
