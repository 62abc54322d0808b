//! Directory holding exactly one registry per capability.

use super::{CapabilityRegistry, DiscoveryContext, ExtensionError, ExtensionResult};
use crate::extension::domain::Capability;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type ErasedRegistry = Arc<dyn Any + Send + Sync>;

static GLOBAL_DIRECTORY: OnceLock<RegistryDirectory> = OnceLock::new();

/// Maps each capability to its registry within one [`DiscoveryContext`].
///
/// Registries are created on first request and shared afterwards; concurrent
/// first requests for the same capability observe the same registry.
pub struct RegistryDirectory {
    context: DiscoveryContext,
    registries: RwLock<HashMap<TypeId, ErasedRegistry>>,
}

impl RegistryDirectory {
    /// Creates an empty directory for `context`.
    #[must_use]
    pub fn new(context: DiscoveryContext) -> Self {
        Self {
            context,
            registries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the discovery context shared by every registry.
    #[must_use]
    pub const fn context(&self) -> &DiscoveryContext {
        &self.context
    }

    /// Returns the registry for capability `T`, creating it on first request.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::MissingCapabilityDescriptor`] when no
    /// capability descriptor is declared for `T`.
    pub fn registry<T>(&self) -> ExtensionResult<Arc<CapabilityRegistry<T>>>
    where
        T: Capability + ?Sized,
    {
        let key = TypeId::of::<T>();
        let existing = self
            .registries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .map(Arc::clone);
        if let Some(erased) = existing {
            return downcast::<T>(erased);
        }

        let descriptor = self
            .context
            .metadata()
            .capability_descriptor(T::NAME)
            .ok_or(ExtensionError::MissingCapabilityDescriptor {
                capability: T::NAME,
            })?;
        let candidate: ErasedRegistry = Arc::new(CapabilityRegistry::<T>::new(
            descriptor,
            self.context.clone(),
        ));

        let erased = {
            let mut registries = self
                .registries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let entry = registries.entry(key).or_insert_with(|| {
                tracing::debug!(capability = T::NAME, "capability registry created");
                candidate
            });
            Arc::clone(entry)
        };
        downcast::<T>(erased)
    }

    /// Returns the number of registries created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no registry has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Installs `directory` as the process-wide directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::GlobalDirectoryInstalled`] when a directory
    /// has already been installed.
    pub fn install_global(directory: Self) -> ExtensionResult<&'static Self> {
        GLOBAL_DIRECTORY
            .set(directory)
            .map_err(|_| ExtensionError::GlobalDirectoryInstalled)?;
        tracing::debug!("global registry directory installed");
        Self::global()
    }

    /// Returns the process-wide directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::GlobalDirectoryMissing`] when no directory
    /// has been installed.
    pub fn global() -> ExtensionResult<&'static Self> {
        GLOBAL_DIRECTORY
            .get()
            .ok_or(ExtensionError::GlobalDirectoryMissing)
    }
}

impl fmt::Debug for RegistryDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryDirectory")
            .field("context", &self.context)
            .field("registries", &self.len())
            .finish()
    }
}

fn downcast<T>(erased: ErasedRegistry) -> ExtensionResult<Arc<CapabilityRegistry<T>>>
where
    T: Capability + ?Sized,
{
    erased
        .downcast::<CapabilityRegistry<T>>()
        .map_err(|_| ExtensionError::RegistryTypeMismatch {
            capability: T::NAME,
        })
}
