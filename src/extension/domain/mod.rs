//! Domain model for capability extension discovery.
//!
//! The extension domain models implementation names, registry identifiers,
//! capability and implementation descriptors, runtime implementation type
//! handles, and the descriptor-resource grammar. Resource location, type
//! activation and metadata lookup stay outside the domain boundary.

mod descriptor;
mod error;
mod identifier;
mod implementation;
mod parser;
mod type_name;

pub use descriptor::{CapabilityDescriptor, ImplementationDescriptor};
pub use error::{ActivationError, ActivationResult, DescriptorSyntaxError, ExtensionDomainError};
pub use identifier::ExtensionId;
pub use implementation::{Capability, ImplementationType, ImplementationTypeBuilder};
pub use parser::CandidateList;
pub use type_name::QualifiedTypeName;
