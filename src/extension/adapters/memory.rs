//! In-memory descriptor resources for embedded discovery and tests.

use crate::extension::ports::{DescriptorResource, DescriptorResourceProvider, ResourceResult};
use std::collections::HashMap;
use std::io::{BufRead, Cursor};
use std::sync::Arc;

/// Descriptor resource whose content is held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryResource {
    location: String,
    content: Arc<str>,
}

impl InMemoryResource {
    /// Creates a resource from its location and text.
    #[must_use]
    pub fn new(location: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        Self {
            location: location.into(),
            content: content.into(),
        }
    }
}

impl DescriptorResource for InMemoryResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn open(&self) -> ResourceResult<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.content.as_bytes())))
    }
}

/// Resource provider backed by descriptor text registered up front.
///
/// Several resources may share a path; they are returned in registration
/// order, mirroring several search-path entries carrying the same file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceProvider {
    resources: HashMap<String, Vec<InMemoryResource>>,
}

impl InMemoryResourceProvider {
    /// Creates a provider with no resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource under `path`.
    #[must_use]
    pub fn with_resource(
        mut self,
        path: impl Into<String>,
        location: impl Into<String>,
        content: impl Into<Arc<str>>,
    ) -> Self {
        self.resources
            .entry(path.into())
            .or_default()
            .push(InMemoryResource::new(location, content));
        self
    }
}

impl DescriptorResourceProvider for InMemoryResourceProvider {
    fn locate(&self, path: &str) -> ResourceResult<Vec<Box<dyn DescriptorResource>>> {
        let located = self
            .resources
            .get(path)
            .into_iter()
            .flatten()
            .map(|resource| Box::new(resource.clone()) as Box<dyn DescriptorResource>)
            .collect();
        Ok(located)
    }
}
