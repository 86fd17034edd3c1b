use std::any::Any;
use std::sync::Arc;

use crate::injector::Injector;
use crate::signature::Signature;
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// A type-erased constructor: given a live [`Injector`] to pull injected
/// parameters from, produces the bound type behind `Arc<dyn Any + Send + Sync>`.
/// The concrete downcast happens at the call site in `injector.rs`, which
/// knows the static type the binding was registered under.
pub type ConstructorThunk = Arc<dyn Fn(&Injector) -> Result<Arc<dyn Any + Send + Sync>, crate::errors::InjectionError> + Send + Sync>;

/// A type-erased assisted-factory body: given a live [`Injector`] plus the
/// caller-supplied assisted arguments (boxed in declaration order), produces
/// the factory's product type.
pub type FactoryThunk = Arc<
    dyn Fn(&Injector, Vec<Box<dyn Any>>) -> Result<Arc<dyn Any + Send + Sync>, crate::errors::InjectionError> + Send + Sync,
>;

/////////////////////////////////////////////////////////////////////////////////////////

/// Casts a type-erased `Arc<dyn Any + Send + Sync>`, known to actually hold
/// an `Impl`, into `Arc<Into>`. Built once at `bind::<Iface, Impl>()` time
/// (the only place both the concrete `Impl` and the `Unsize<Iface>` bound
/// are in scope together) and carried erased behind `Any` inside
/// [`BindingKind::BindTo`] until the call site downcasts it back to
/// `TypeCaster<Iface>` by its own statically-known `Iface`.
pub(crate) struct TypeCaster<Into: ?Sized> {
    pub cast_arc: fn(Arc<dyn Any + Send + Sync>) -> Arc<Into>,
}

/////////////////////////////////////////////////////////////////////////////////////////

/// The seven ways a [`crate::partial::Partial`] can bind a type, carried
/// verbatim from registration through compilation into the sealed binding
/// map. Each variant is a different answer to "how do we produce this type".
#[derive(Clone)]
pub enum BindingKind {
    /// Build `target` by calling a constructor thunk with injected params
    /// resolved from the container.
    Constructor {
        signature: Signature,
        thunk: ConstructorThunk,
    },

    /// `target` is a fixed, externally-supplied instance. Never memoized
    /// freshly — the same `Arc` is handed out every time.
    Instance { instance: Arc<dyn Any + Send + Sync> },

    /// Build `target` by calling a user-supplied provider thunk, identical
    /// in shape to `Constructor` but registered through `bind_provider`
    /// rather than deduced from a `Buildable` impl.
    Provider {
        signature: Signature,
        thunk: ConstructorThunk,
    },

    /// `target` (an interface) is realized by resolving `implementation`
    /// instead. Compiled away by the compiler's alias-resolution pass;
    /// never present in the final `BindingMap` as its own entry, though its
    /// `caster` (erased `TypeCaster<target>`) is what lets `Injector::get`
    /// hand the caller an `Arc<target>` built from the implementation's
    /// memoized instance.
    BindTo {
        implementation: TypeInfo,
        caster: Arc<dyn Any + Send + Sync>,
    },

    /// `target` is an assisted-factory product, built by `thunk` which
    /// receives both the injector and the caller's assisted arguments.
    Factory {
        signature: Signature,
        thunk: FactoryThunk,
    },

    /// One contribution to the multibinding set for interface `element`,
    /// built by `thunk` (which produces the *concrete* contributing type,
    /// not `element` itself) plus the `caster` that turns that concrete
    /// instance into `Arc<element>` — the same cast-on-retrieval mechanism
    /// `BindTo` uses, since `element` is typically an unsized trait object
    /// and many distinct concrete contributions share one `element` key.
    /// Multiple `Multibinding` declarations with the same `element` coexist
    /// rather than conflicting, unlike every other kind.
    Multibinding {
        element: TypeInfo,
        signature: Signature,
        thunk: ConstructorThunk,
        caster: Arc<dyn Any + Send + Sync>,
    },

    /// Not a binding of `target` itself: a record that another [`crate::partial::Partial`]
    /// (identified by `source`) was installed into this one. Carried through
    /// compilation purely for install-dedup bookkeeping and diagnostics; it
    /// never appears as a resolvable entry in the `BindingMap`.
    Install { source: crate::partial::PartialId },
}

impl std::fmt::Debug for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constructor { signature, .. } => {
                f.debug_struct("Constructor").field("signature", signature).finish()
            }
            Self::Instance { .. } => f.debug_struct("Instance").finish_non_exhaustive(),
            Self::Provider { signature, .. } => f.debug_struct("Provider").field("signature", signature).finish(),
            Self::BindTo { implementation, .. } => {
                f.debug_struct("BindTo").field("implementation", implementation).finish_non_exhaustive()
            }
            Self::Factory { signature, .. } => f.debug_struct("Factory").field("signature", signature).finish(),
            Self::Multibinding { element, signature, .. } => f
                .debug_struct("Multibinding")
                .field("element", element)
                .field("signature", signature)
                .finish_non_exhaustive(),
            Self::Install { source } => f.debug_struct("Install").field("source", source).finish(),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// One entry recorded by a [`crate::partial::Partial`]: the type it binds
/// plus how, tagged with the order it was registered in so the compiler can
/// report deterministic, source-order diagnostics and multibinding ordering.
#[derive(Clone)]
pub struct Declaration {
    pub target: TypeInfo,
    pub kind: BindingKind,
    pub order: usize,
    /// Identity of the [`crate::partial::Partial`] whose `push` originally
    /// created this declaration (not the partial that most recently
    /// re-exported it through `install`). `install` uses this, not the
    /// declaration's position, to recognize a declaration it already
    /// absorbed through some other path in a diamond install.
    pub origin: crate::partial::PartialId,
}
