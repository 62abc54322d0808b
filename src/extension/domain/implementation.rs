//! Runtime handles for capabilities and concrete implementation types.
//!
//! Rust has no class objects to reflect over, so each concrete type is
//! described by an [`ImplementationType`]: its qualified name, its declared
//! [`ImplementationDescriptor`], an optional zero-argument constructor, and
//! the capabilities it can be viewed as. Instances are built type-erased and
//! converted to `Arc<T>` for the requested capability `T`.

use super::{
    ActivationError, ActivationResult, ExtensionDomainError, ImplementationDescriptor,
    QualifiedTypeName,
};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Abstract contract served by a capability registry.
///
/// Implemented for the trait-object type of a capability trait:
///
/// ```
/// use capability_registry::extension::domain::Capability;
///
/// pub trait Codec: Send + Sync {
///     fn encode(&self, input: &str) -> String;
/// }
///
/// impl Capability for dyn Codec {
///     const NAME: &'static str = "demo.codec.Codec";
/// }
/// ```
pub trait Capability: Send + Sync + 'static {
    /// Fully-qualified capability name. Descriptor resources are located
    /// under this name and capability metadata is keyed by it.
    const NAME: &'static str;
}

type ErasedInstance = Arc<dyn Any + Send + Sync>;
type ConstructionFailure = Arc<dyn std::error::Error + Send + Sync>;
type ErasedConstructor =
    Arc<dyn Fn() -> Result<ErasedInstance, ConstructionFailure> + Send + Sync>;

/// Converts an erased instance into a view of capability `T`.
struct Upcast<T: ?Sized>(Arc<dyn Fn(ErasedInstance) -> Option<Arc<T>> + Send + Sync>);

struct Inner {
    name: QualifiedTypeName,
    descriptor: Option<ImplementationDescriptor>,
    constructor: Option<ErasedConstructor>,
    upcasts: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    capabilities: Vec<&'static str>,
}

/// Cheaply clonable description of a concrete implementation type.
#[derive(Clone)]
pub struct ImplementationType {
    inner: Arc<Inner>,
}

impl ImplementationType {
    /// Starts describing the concrete type `C` under `name`.
    #[must_use]
    pub fn builder<C>(name: impl Into<String>) -> ImplementationTypeBuilder<C>
    where
        C: Send + Sync + 'static,
    {
        ImplementationTypeBuilder {
            name: name.into(),
            descriptor: None,
            constructor: None,
            upcasts: HashMap::new(),
            capabilities: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Returns the qualified type name.
    #[must_use]
    pub fn name(&self) -> &QualifiedTypeName {
        &self.inner.name
    }

    /// Returns the declared implementation descriptor, if any.
    #[must_use]
    pub fn descriptor(&self) -> Option<&ImplementationDescriptor> {
        self.inner.descriptor.as_ref()
    }

    /// Returns whether instances of this type can be viewed as `T`.
    #[must_use]
    pub fn satisfies<T: ?Sized + 'static>(&self) -> bool {
        self.inner.upcasts.contains_key(&TypeId::of::<T>())
    }

    /// Returns whether the type declares a zero-argument constructor.
    #[must_use]
    pub fn has_default_constructor(&self) -> bool {
        self.inner.constructor.is_some()
    }

    /// Constructs a fresh instance and returns it as capability `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ActivationError::NotAssignable`] when the type does not
    /// satisfy `T`, [`ActivationError::NoConstructor`] when it has no
    /// zero-argument constructor, or [`ActivationError::ConstructorFailed`]
    /// when construction reports a failure.
    pub fn instantiate<T: ?Sized + 'static>(&self) -> ActivationResult<Arc<T>> {
        let upcast = self
            .inner
            .upcasts
            .get(&TypeId::of::<T>())
            .and_then(|erased| erased.downcast_ref::<Upcast<T>>())
            .ok_or_else(|| self.not_assignable::<T>())?;
        let constructor = self
            .inner
            .constructor
            .as_ref()
            .ok_or_else(|| ActivationError::NoConstructor(self.inner.name.clone()))?;
        let instance = constructor().map_err(|source| ActivationError::ConstructorFailed {
            implementation: self.inner.name.clone(),
            source,
        })?;
        (upcast.0)(instance).ok_or_else(|| self.not_assignable::<T>())
    }

    fn not_assignable<T: ?Sized>(&self) -> ActivationError {
        ActivationError::NotAssignable {
            implementation: self.inner.name.clone(),
            capability: type_name::<T>(),
        }
    }
}

impl fmt::Debug for ImplementationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationType")
            .field("name", &self.inner.name)
            .field("descriptor", &self.inner.descriptor)
            .field("has_default_constructor", &self.has_default_constructor())
            .field("capabilities", &self.inner.capabilities)
            .finish()
    }
}

/// Builder for [`ImplementationType`] describing concrete type `C`.
pub struct ImplementationTypeBuilder<C> {
    name: String,
    descriptor: Option<ImplementationDescriptor>,
    constructor: Option<ErasedConstructor>,
    upcasts: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    capabilities: Vec<&'static str>,
    marker: PhantomData<fn() -> C>,
}

impl<C> ImplementationTypeBuilder<C>
where
    C: Send + Sync + 'static,
{
    /// Attaches the implementation descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: ImplementationDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Declares `C::default` as the zero-argument constructor.
    #[must_use]
    pub fn with_default_constructor(self) -> Self
    where
        C: Default,
    {
        self.with_constructor(C::default)
    }

    /// Declares an infallible zero-argument constructor.
    #[must_use]
    pub fn with_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        let erased: ErasedConstructor =
            Arc::new(move || Ok(Arc::new(constructor()) as ErasedInstance));
        self.constructor = Some(erased);
        self
    }

    /// Declares a zero-argument constructor that may fail.
    #[must_use]
    pub fn with_fallible_constructor<F, E>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<C, E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let erased: ErasedConstructor = Arc::new(move || {
            constructor()
                .map(|instance| Arc::new(instance) as ErasedInstance)
                .map_err(|err| Arc::new(err) as ConstructionFailure)
        });
        self.constructor = Some(erased);
        self
    }

    /// Declares that `C` satisfies capability `T`.
    ///
    /// `cast` performs the unsizing conversion and is usually written
    /// `|instance| instance`.
    #[must_use]
    pub fn satisfies<T>(mut self, cast: fn(Arc<C>) -> Arc<T>) -> Self
    where
        T: ?Sized + 'static,
    {
        let upcast = Upcast::<T>(Arc::new(move |erased: ErasedInstance| {
            erased.downcast::<C>().ok().map(cast)
        }));
        self.upcasts.insert(TypeId::of::<T>(), Arc::new(upcast));
        self.capabilities.push(type_name::<T>());
        self
    }

    /// Finishes the type description.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionDomainError`] when the type name is not a valid
    /// dotted identifier.
    pub fn build(self) -> Result<ImplementationType, ExtensionDomainError> {
        let name = QualifiedTypeName::new(self.name)?;
        Ok(ImplementationType {
            inner: Arc::new(Inner {
                name,
                descriptor: self.descriptor,
                constructor: self.constructor,
                upcasts: self.upcasts,
                capabilities: self.capabilities,
            }),
        })
    }
}
