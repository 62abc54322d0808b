//! Port contracts for the collaborators extension discovery depends on.
//!
//! The host process supplies descriptor resources, resolves implementation
//! type names, and answers metadata queries through these traits.

mod activator;
mod metadata;
mod resource;

pub use activator::TypeActivator;
pub use metadata::MetadataReader;
pub use resource::{
    DescriptorResource, DescriptorResourceProvider, ResourceError, ResourceResult,
};
