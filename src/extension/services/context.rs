//! Collaborators shared by every registry in one isolation scope.

use crate::extension::{
    adapters::TypeCatalog,
    config::DiscoveryConfig,
    ports::{DescriptorResourceProvider, MetadataReader, TypeActivator},
};
use std::fmt;
use std::sync::Arc;

/// Isolation scope for extension discovery.
///
/// Bundles the resource provider, type activator, metadata reader and
/// configuration used to populate registries. Cloning is cheap; clones share
/// the same collaborators.
#[derive(Clone)]
pub struct DiscoveryContext {
    config: Arc<DiscoveryConfig>,
    resources: Arc<dyn DescriptorResourceProvider>,
    activator: Arc<dyn TypeActivator>,
    metadata: Arc<dyn MetadataReader>,
}

impl DiscoveryContext {
    /// Creates a context with the default configuration.
    #[must_use]
    pub fn new(
        resources: Arc<dyn DescriptorResourceProvider>,
        activator: Arc<dyn TypeActivator>,
        metadata: Arc<dyn MetadataReader>,
    ) -> Self {
        Self {
            config: Arc::new(DiscoveryConfig::default()),
            resources,
            activator,
            metadata,
        }
    }

    /// Creates a context whose types and metadata come from one catalog.
    #[must_use]
    pub fn with_catalog(
        resources: Arc<dyn DescriptorResourceProvider>,
        catalog: Arc<TypeCatalog>,
    ) -> Self {
        Self::new(resources, Arc::clone(&catalog) as Arc<dyn TypeActivator>, catalog)
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Returns the discovery configuration.
    #[must_use]
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Returns the descriptor resource provider.
    #[must_use]
    pub fn resources(&self) -> &dyn DescriptorResourceProvider {
        self.resources.as_ref()
    }

    /// Returns the type activator.
    #[must_use]
    pub fn activator(&self) -> &dyn TypeActivator {
        self.activator.as_ref()
    }

    /// Returns the metadata reader.
    #[must_use]
    pub fn metadata(&self) -> &dyn MetadataReader {
        self.metadata.as_ref()
    }
}

impl fmt::Debug for DiscoveryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
