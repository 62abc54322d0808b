//! Metadata lookup port.

use crate::extension::domain::{
    CapabilityDescriptor, ImplementationDescriptor, ImplementationType,
};

/// Answers descriptor queries for capabilities and implementation types.
pub trait MetadataReader: Send + Sync {
    /// Returns the descriptor declared for the named capability.
    fn capability_descriptor(&self, capability: &str) -> Option<CapabilityDescriptor>;

    /// Returns the descriptor declared on an implementation type.
    fn implementation_descriptor(
        &self,
        implementation: &ImplementationType,
    ) -> Option<ImplementationDescriptor>;
}
