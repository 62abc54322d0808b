//! Capability discovery and lookup.
//!
//! A capability is an abstract contract, modelled as a trait object type
//! implementing [`domain::Capability`]. Concrete implementations are declared
//! in line-oriented descriptor resources named after the capability; a
//! [`services::CapabilityRegistry`] reads those resources on first use,
//! validates each candidate, and serves instances by identifier or category.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Discovery configuration in [`config`]
//! - Registry services in [`services`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use capability_registry::extension::{
//!     adapters::{TypeCatalog, memory::InMemoryResourceProvider},
//!     domain::{Capability, CapabilityDescriptor, ImplementationType},
//!     services::{DiscoveryContext, RegistryDirectory},
//! };
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//! impl Capability for dyn Greeter {
//!     const NAME: &'static str = "demo.Greeter";
//! }
//!
//! #[derive(Default)]
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_owned()
//!     }
//! }
//!
//! let english = ImplementationType::builder::<English>("demo.English")
//!     .with_default_constructor()
//!     .satisfies::<dyn Greeter>(|instance| instance)
//!     .build()
//!     .expect("valid type name");
//! let catalog = TypeCatalog::new()
//!     .with_capability::<dyn Greeter>(CapabilityDescriptor::singleton("English"))
//!     .with_type(english);
//! let resources = InMemoryResourceProvider::new().with_resource(
//!     "META-INF/services/demo.Greeter",
//!     "memory:greeters",
//!     "demo.English\n",
//! );
//! let context = DiscoveryContext::with_catalog(Arc::new(resources), Arc::new(catalog));
//! let directory = RegistryDirectory::new(context);
//!
//! let greeters = directory.registry::<dyn Greeter>().expect("descriptor declared");
//! let greeter = greeters
//!     .default_extension()
//!     .expect("discovery succeeds")
//!     .expect("default registered");
//! assert_eq!(greeter.greet(), "hello");
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
