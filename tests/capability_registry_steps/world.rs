//! Shared world state for capability registry BDD scenarios.

use crate::test_helpers::{FORMATTER_PATH, Formatter, shared_catalog};
use capability_registry::extension::{
    adapters::memory::InMemoryResourceProvider,
    domain::CapabilityDescriptor,
    services::{CapabilityRegistry, DiscoveryContext, ExtensionError, RegistryDirectory},
};
use rstest::fixture;
use std::sync::Arc;

/// Scenario world for capability registry behaviour tests.
#[derive(Default)]
pub struct RegistryWorld {
    pub listing: Vec<String>,
    pub descriptor: Option<CapabilityDescriptor>,
    pub directory: Option<RegistryDirectory>,
    pub lookups: Vec<Arc<dyn Formatter>>,
    pub listed: Vec<Arc<dyn Formatter>>,
    pub last_error: Option<ExtensionError>,
}

impl RegistryWorld {
    /// Returns the formatter registry, building the directory on first use.
    pub fn registry(&mut self) -> Result<Arc<CapabilityRegistry<dyn Formatter>>, eyre::Report> {
        if self.directory.is_none() {
            let descriptor = self
                .descriptor
                .clone()
                .ok_or_else(|| eyre::eyre!("missing capability descriptor in scenario world"))?;
            let mut content = self.listing.join("\n");
            content.push('\n');
            let resources = InMemoryResourceProvider::new().with_resource(
                FORMATTER_PATH,
                "memory:formatters",
                content,
            );
            self.directory = Some(RegistryDirectory::new(DiscoveryContext::with_catalog(
                Arc::new(resources),
                shared_catalog(descriptor),
            )));
        }
        let directory = self
            .directory
            .as_ref()
            .ok_or_else(|| eyre::eyre!("registry directory was not built"))?;
        directory
            .registry::<dyn Formatter>()
            .map_err(|err| eyre::eyre!("formatter registry unavailable: {err}"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistryWorld {
    RegistryWorld::default()
}
