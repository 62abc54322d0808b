//! Application services for capability discovery and lookup.

mod context;
mod directory;
mod error;
mod registry;
mod validator;

pub use context::DiscoveryContext;
pub use directory::RegistryDirectory;
pub use error::{ExtensionError, ExtensionErrorKind, ExtensionResult};
pub use registry::CapabilityRegistry;
pub use validator::{ImplementationValidator, ValidationError};
