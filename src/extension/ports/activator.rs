//! Type activation port.

use crate::extension::domain::{ActivationResult, ImplementationType, QualifiedTypeName};

/// Resolves implementation type names declared in descriptor resources.
///
/// Resolution produces an [`ImplementationType`] handle; instances are then
/// built through [`ImplementationType::instantiate`].
pub trait TypeActivator: Send + Sync {
    /// Resolves a qualified type name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::extension::domain::ActivationError::UnknownType`] when
    /// no type is known under `name`.
    fn resolve(&self, name: &QualifiedTypeName) -> ActivationResult<ImplementationType>;
}
