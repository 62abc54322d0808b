//! Per-capability registry of discovered and manually registered extensions.
//!
//! A [`CapabilityRegistry`] populates itself on first use: it reads every
//! descriptor resource for its capability, resolves and validates each
//! candidate, and records the admitted implementations by identifier. Lookups
//! then serve instances, cached per identifier for singleton capabilities and
//! constructed per call otherwise.

use super::{
    DiscoveryContext, ExtensionError, ExtensionResult, ImplementationValidator,
};
use crate::extension::{
    domain::{
        CandidateList, Capability, CapabilityDescriptor, ExtensionId, ImplementationDescriptor,
        ImplementationType, QualifiedTypeName,
    },
    ports::{DescriptorResource, ResourceError},
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::BufRead;
use std::sync::{
    Arc, Mutex, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

#[derive(Debug, Clone)]
struct RegisteredExtension {
    implementation: ImplementationType,
    descriptor: Option<ImplementationDescriptor>,
}

impl RegisteredExtension {
    fn order(&self) -> Option<i32> {
        self.descriptor.as_ref().map(ImplementationDescriptor::order)
    }

    fn in_category(&self, category: &str) -> bool {
        category.is_empty()
            || self
                .descriptor
                .as_ref()
                .is_some_and(|descriptor| descriptor.has_category(category))
    }
}

/// Singleton instance of one identifier.
///
/// Creation is serialised per identifier, so a constructor may look up other
/// identifiers of the same registry.
struct SingletonSlot<T: ?Sized> {
    instance: OnceLock<Arc<T>>,
    creation: Mutex<()>,
}

impl<T: ?Sized> SingletonSlot<T> {
    const fn new() -> Self {
        Self {
            instance: OnceLock::new(),
            creation: Mutex::new(()),
        }
    }

    fn get(&self) -> Option<Arc<T>> {
        self.instance.get().map(Arc::clone)
    }

    fn get_or_try_create<F>(&self, create: F) -> ExtensionResult<Arc<T>>
    where
        F: FnOnce() -> ExtensionResult<Arc<T>>,
    {
        if let Some(instance) = self.get() {
            return Ok(instance);
        }
        let _creating = self
            .creation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = self.get() {
            return Ok(instance);
        }
        let created = create()?;
        Ok(Arc::clone(self.instance.get_or_init(|| created)))
    }
}

struct RegistryState<T: ?Sized> {
    implementations: RwLock<BTreeMap<ExtensionId, RegisteredExtension>>,
    singletons: RwLock<HashMap<ExtensionId, Arc<SingletonSlot<T>>>>,
}

impl<T: ?Sized> RegistryState<T> {
    fn new(implementations: BTreeMap<ExtensionId, RegisteredExtension>) -> Self {
        Self {
            implementations: RwLock::new(implementations),
            singletons: RwLock::new(HashMap::new()),
        }
    }

    fn lookup(&self, identifier: &str) -> Option<(ExtensionId, RegisteredExtension)> {
        read_lock(&self.implementations)
            .get_key_value(identifier)
            .map(|(id, registered)| (id.clone(), registered.clone()))
    }

    fn cached(&self, identifier: &str) -> Option<Arc<T>> {
        read_lock(&self.singletons)
            .get(identifier)
            .and_then(|slot| slot.get())
    }

    /// Returns the slot for `id`, inserting an empty one if absent. The map
    /// lock is released before the slot is used.
    fn slot(&self, id: &ExtensionId) -> Arc<SingletonSlot<T>> {
        if let Some(slot) = read_lock(&self.singletons).get(id) {
            return Arc::clone(slot);
        }
        Arc::clone(
            write_lock(&self.singletons)
                .entry(id.clone())
                .or_insert_with(|| Arc::new(SingletonSlot::new())),
        )
    }
}

/// Registry of the implementations of capability `T` within one isolation
/// scope.
///
/// Obtain registries from [`super::RegistryDirectory::registry`], which keeps
/// exactly one registry per capability.
///
/// Discovery runs on the first operation and its outcome is kept. When a
/// descriptor resource is malformed, that operation and every later one
/// return the same [`ExtensionError::DescriptorSyntax`].
pub struct CapabilityRegistry<T: Capability + ?Sized> {
    descriptor: CapabilityDescriptor,
    context: DiscoveryContext,
    validator: ImplementationValidator,
    state: OnceLock<ExtensionResult<RegistryState<T>>>,
}

impl<T: Capability + ?Sized> CapabilityRegistry<T> {
    pub(crate) const fn new(descriptor: CapabilityDescriptor, context: DiscoveryContext) -> Self {
        Self {
            descriptor,
            context,
            validator: ImplementationValidator::new(),
            state: OnceLock::new(),
        }
    }

    /// Returns the fully-qualified capability name.
    #[must_use]
    pub const fn capability_name(&self) -> &'static str {
        T::NAME
    }

    /// Returns the capability descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    /// Returns the implementation type registered under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::DescriptorSyntax`] when a descriptor resource
    /// for the capability is malformed. Discovery runs once, so the error is
    /// kept and every later call on this registry returns it again.
    pub fn extension_type(&self, identifier: &str) -> ExtensionResult<Option<ImplementationType>> {
        let state = self.state()?;
        Ok(state
            .lookup(identifier)
            .map(|(_, registered)| registered.implementation))
    }

    /// Returns every registered identifier in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::DescriptorSyntax`] when a descriptor resource
    /// for the capability is malformed.
    pub fn identifiers(&self) -> ExtensionResult<Vec<ExtensionId>> {
        let state = self.state()?;
        Ok(read_lock(&state.implementations).keys().cloned().collect())
    }

    /// Returns the implementation named by the capability's default
    /// identifier, or `None` when no implementation carries it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::DefaultIdentifierUnset`] when the capability
    /// declares no default identifier, and otherwise the errors of
    /// [`Self::extension`].
    pub fn default_extension(&self) -> ExtensionResult<Option<Arc<T>>> {
        let state = self.state()?;
        let identifier = self
            .descriptor
            .default_identifier()
            .ok_or(ExtensionError::DefaultIdentifierUnset {
                capability: T::NAME,
            })?;
        self.resolve(state, identifier)
    }

    /// Returns the implementation registered under `identifier`, or `None`
    /// when the identifier is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Activation`] when the implementation cannot
    /// be constructed, or [`ExtensionError::DescriptorSyntax`] when a
    /// descriptor resource for the capability is malformed.
    pub fn extension(&self, identifier: &str) -> ExtensionResult<Option<Arc<T>>> {
        let state = self.state()?;
        self.resolve(state, identifier)
    }

    /// Returns one instance per implementation carrying `category`, or per
    /// registered implementation when `category` is empty.
    ///
    /// Instances are sorted by ascending descriptor order. Implementations
    /// without a descriptor come after every implementation that has one;
    /// ties keep ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Activation`] when an implementation cannot be
    /// constructed, or [`ExtensionError::DescriptorSyntax`] when a descriptor
    /// resource for the capability is malformed.
    pub fn extensions(&self, category: &str) -> ExtensionResult<Vec<Arc<T>>> {
        let state = self.state()?;
        let selected: Vec<(ExtensionId, Option<i32>)> = read_lock(&state.implementations)
            .iter()
            .filter(|(_, registered)| registered.in_category(category))
            .map(|(id, registered)| (id.clone(), registered.order()))
            .collect();

        let mut ranked = Vec::with_capacity(selected.len());
        for (id, order) in selected {
            if let Some(instance) = self.resolve(state, id.as_str())? {
                ranked.push((order, instance));
            }
        }
        ranked.sort_by_key(|(order, _)| rank(*order));
        Ok(ranked.into_iter().map(|(_, instance)| instance).collect())
    }

    /// Returns one instance per registered implementation.
    ///
    /// # Errors
    ///
    /// See [`Self::extensions`].
    pub fn all_extensions(&self) -> ExtensionResult<Vec<Arc<T>>> {
        self.extensions("")
    }

    /// Registers an implementation type alongside the discovered ones.
    ///
    /// Discovery runs first so both share one identifier namespace. Returns
    /// the identifier the implementation was registered under.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Validation`] when the type cannot serve the
    /// capability, [`ExtensionError::DuplicateIdentifier`] when its identifier
    /// is taken, or [`ExtensionError::DescriptorSyntax`] when a descriptor
    /// resource for the capability is malformed.
    pub fn add_extension_type(
        &self,
        implementation: ImplementationType,
    ) -> ExtensionResult<ExtensionId> {
        let state = self.state()?;
        let mut implementations = write_lock(&state.implementations);
        let (id, registered) = self.admit(implementation, &implementations)?;
        tracing::debug!(
            capability = T::NAME,
            identifier = %id,
            implementation = %registered.implementation.name(),
            "extension registered",
        );
        implementations.insert(id.clone(), registered);
        Ok(id)
    }

    fn state(&self) -> ExtensionResult<&RegistryState<T>> {
        self.state
            .get_or_init(|| self.discover())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn discover(&self) -> ExtensionResult<RegistryState<T>> {
        let candidates = self.collect_candidates()?;
        let mut implementations = BTreeMap::new();
        for name in candidates.into_names() {
            let admitted = self
                .activate_candidate(&name)
                .and_then(|implementation| self.admit(implementation, &implementations));
            match admitted {
                Ok((id, registered)) => {
                    implementations.insert(id, registered);
                }
                Err(err) => tracing::warn!(
                    capability = T::NAME,
                    candidate = %name,
                    error = %err,
                    "skipping extension candidate",
                ),
            }
        }
        tracing::debug!(
            capability = T::NAME,
            count = implementations.len(),
            "extension discovery complete",
        );
        Ok(RegistryState::new(implementations))
    }

    fn collect_candidates(&self) -> ExtensionResult<CandidateList> {
        let path = self.context.config().resource_path(T::NAME);
        let mut candidates = CandidateList::new();
        let resources = match self.context.resources().locate(&path) {
            Ok(resources) => resources,
            Err(err) => {
                tracing::warn!(
                    capability = T::NAME,
                    error = %err,
                    "descriptor resources unavailable",
                );
                return Ok(candidates);
            }
        };

        for resource in &resources {
            Self::read_resource(resource.as_ref(), &mut candidates)?;
        }
        Ok(candidates)
    }

    fn read_resource(
        resource: &dyn DescriptorResource,
        candidates: &mut CandidateList,
    ) -> ExtensionResult<()> {
        let reader = match resource.open() {
            Ok(reader) => reader,
            Err(err) => {
                tracing::warn!(
                    capability = T::NAME,
                    location = resource.location(),
                    error = %err,
                    "skipping descriptor resource",
                );
                return Ok(());
            }
        };

        for (index, read) in reader.lines().enumerate() {
            let text = match read {
                Ok(text) => text,
                Err(err) => {
                    let failure = ResourceError::unreadable(resource.location(), err);
                    tracing::warn!(
                        capability = T::NAME,
                        location = resource.location(),
                        error = %failure,
                        "descriptor resource truncated",
                    );
                    return Ok(());
                }
            };
            candidates
                .push_line(resource.location(), index + 1, &text)
                .map_err(|source| ExtensionError::DescriptorSyntax {
                    capability: T::NAME,
                    source,
                })?;
        }
        Ok(())
    }

    fn activate_candidate(&self, name: &QualifiedTypeName) -> ExtensionResult<ImplementationType> {
        self.context
            .activator()
            .resolve(name)
            .map_err(|source| ExtensionError::Activation {
                capability: T::NAME,
                target: name.to_string(),
                source,
            })
    }

    fn admit(
        &self,
        implementation: ImplementationType,
        existing: &BTreeMap<ExtensionId, RegisteredExtension>,
    ) -> ExtensionResult<(ExtensionId, RegisteredExtension)> {
        self.validator
            .validate::<T>(&implementation)
            .map_err(|source| ExtensionError::Validation {
                capability: T::NAME,
                source,
            })?;

        let descriptor = self
            .context
            .metadata()
            .implementation_descriptor(&implementation);
        let id = ExtensionId::resolve(implementation.name(), descriptor.as_ref());
        if existing.contains_key(&id) {
            return Err(ExtensionError::DuplicateIdentifier {
                capability: T::NAME,
                identifier: id,
                implementation: implementation.name().to_string(),
            });
        }

        Ok((
            id,
            RegisteredExtension {
                implementation,
                descriptor,
            },
        ))
    }

    fn resolve(
        &self,
        state: &RegistryState<T>,
        identifier: &str,
    ) -> ExtensionResult<Option<Arc<T>>> {
        if !self.descriptor.is_singleton() {
            return state
                .lookup(identifier)
                .map(|(id, registered)| Self::instantiate(&id, &registered))
                .transpose();
        }

        if let Some(instance) = state.cached(identifier) {
            return Ok(Some(instance));
        }
        let Some((id, registered)) = state.lookup(identifier) else {
            return Ok(None);
        };

        state
            .slot(&id)
            .get_or_try_create(|| {
                let instance = Self::instantiate(&id, &registered)?;
                tracing::trace!(capability = T::NAME, identifier = %id, "singleton extension created");
                Ok(instance)
            })
            .map(Some)
    }

    fn instantiate(id: &ExtensionId, registered: &RegisteredExtension) -> ExtensionResult<Arc<T>> {
        registered
            .implementation
            .instantiate::<T>()
            .map_err(|source| ExtensionError::Activation {
                capability: T::NAME,
                target: id.to_string(),
                source,
            })
    }
}

impl<T: Capability + ?Sized> fmt::Debug for CapabilityRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("capability", &T::NAME)
            .field("descriptor", &self.descriptor)
            .field("populated", &self.state.get().is_some())
            .finish_non_exhaustive()
    }
}

/// Sort key placing implementations without a descriptor last.
fn rank(order: Option<i32>) -> (bool, i32) {
    order.map_or((true, 0), |value| (false, value))
}

fn read_lock<V>(lock: &RwLock<V>) -> RwLockReadGuard<'_, V> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<V>(lock: &RwLock<V>) -> RwLockWriteGuard<'_, V> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
