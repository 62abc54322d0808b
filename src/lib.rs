//! Capability registry: discovery and lookup of pluggable implementations.
//!
//! Hosts declare capabilities (abstract contracts) and their implementations.
//! Descriptor resources named after each capability list the implementations
//! to load; registries read them lazily, validate every candidate, and hand
//! out instances by identifier, by category, or as the capability's default.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: names, identifiers, descriptors and implementation handles
//! - **Ports**: resource lookup, type activation and metadata traits
//! - **Adapters**: in-memory and filesystem resources plus a type catalog
//! - **Services**: per-capability registries and the registry directory
//!
//! # Modules
//!
//! - [`extension`]: capability discovery and lookup

pub mod extension;
