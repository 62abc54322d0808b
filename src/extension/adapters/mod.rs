//! Adapter implementations for extension discovery ports.

pub mod filesystem;
pub mod memory;

mod catalog;

pub use catalog::TypeCatalog;
