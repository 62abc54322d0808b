//! Declarative factory table of implementation types and capability metadata.

use crate::extension::{
    domain::{
        ActivationError, ActivationResult, Capability, CapabilityDescriptor,
        ImplementationDescriptor, ImplementationType, QualifiedTypeName,
    },
    ports::{MetadataReader, TypeActivator},
};
use std::collections::HashMap;

/// Registration-time table of the types and capabilities a host declares.
///
/// The catalog resolves implementation type names for discovery and answers
/// metadata queries: capability descriptors are declared per capability, and
/// implementation descriptors are read from the declared types.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use capability_registry::extension::{
///     adapters::TypeCatalog,
///     domain::{Capability, CapabilityDescriptor, ImplementationType, QualifiedTypeName},
///     ports::TypeActivator,
/// };
///
/// pub trait Greeter: Send + Sync {}
/// impl Capability for dyn Greeter {
///     const NAME: &'static str = "demo.Greeter";
/// }
///
/// #[derive(Default)]
/// struct English;
/// impl Greeter for English {}
///
/// let english = ImplementationType::builder::<English>("demo.English")
///     .with_default_constructor()
///     .satisfies::<dyn Greeter>(|instance| instance)
///     .build()
///     .expect("valid type name");
/// let catalog = TypeCatalog::new()
///     .with_capability::<dyn Greeter>(CapabilityDescriptor::singleton("English"))
///     .with_type(english);
///
/// let name = QualifiedTypeName::new("demo.English").expect("valid type name");
/// assert!(catalog.resolve(&name).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<QualifiedTypeName, ImplementationType>,
    capabilities: HashMap<String, CapabilityDescriptor>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an implementation type, replacing any type of the same name.
    #[must_use]
    pub fn with_type(mut self, implementation: ImplementationType) -> Self {
        self.types
            .insert(implementation.name().clone(), implementation);
        self
    }

    /// Declares the descriptor of capability `T`.
    #[must_use]
    pub fn with_capability<T>(mut self, descriptor: CapabilityDescriptor) -> Self
    where
        T: Capability + ?Sized,
    {
        self.capabilities.insert(T::NAME.to_owned(), descriptor);
        self
    }
}

impl TypeActivator for TypeCatalog {
    fn resolve(&self, name: &QualifiedTypeName) -> ActivationResult<ImplementationType> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| ActivationError::UnknownType(name.clone()))
    }
}

impl MetadataReader for TypeCatalog {
    fn capability_descriptor(&self, capability: &str) -> Option<CapabilityDescriptor> {
        self.capabilities.get(capability).cloned()
    }

    fn implementation_descriptor(
        &self,
        implementation: &ImplementationType,
    ) -> Option<ImplementationDescriptor> {
        implementation.descriptor().cloned()
    }
}
