use std::any::Any;
use std::collections::HashSet;
use std::marker::Unsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::binding::{BindingKind, ConstructorThunk, Declaration, FactoryThunk};
use crate::errors::InjectionError;
use crate::injector::Injector;
use crate::signature::Signature;
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// Identity of a [`Partial`], minted once per `Partial::new()` and carried
/// through every clone and every `install()`. Two `Partial`s are never equal
/// even if they declare identical bindings — identity, not content, is the
/// dedup key `install()` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialId(usize);

impl PartialId {
    fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// A type that knows how to describe its own constructor without runtime
/// reflection. The `weft-macros` `#[derive(Buildable)]` macro generates this
/// impl by reading field types off the struct; nothing here requires the
/// macro, a hand-written impl works identically.
pub trait Buildable: 'static + Send + Sync + Sized {
    fn signature() -> Signature;
    fn construct(injector: &Injector) -> Result<Self, InjectionError>;
}

/////////////////////////////////////////////////////////////////////////////////////////

/// A mutable, linear binding-graph builder consumed by every registration
/// method and finally by [`Partial::seal`]. Declarations accumulate in
/// source order; nothing is validated until `seal()` runs the compiler.
///
/// Every method takes and returns `self` by value rather than mutating
/// through `&mut self`, so a `Partial` cannot be registered into two
/// different seals: its declarations are "used up" exactly once, either by
/// `seal` or by being installed into another `Partial`.
pub struct Partial {
    pub(crate) id: PartialId,
    pub(crate) declarations: Vec<Declaration>,
    pub(crate) installed: HashSet<PartialId>,
    next_order: usize,
}

impl Default for Partial {
    fn default() -> Self {
        Self::new()
    }
}

/// Forking a `Partial` keeps its `id`, so two forks installed into different
/// parents are still recognized as "the same source partial" by `install`'s
/// diamond-dedup check — exactly the shared-module scenario a real host
/// wants ("this auth module is installed by both the HTTP and the CLI
/// front-end components, install it into both").
impl Clone for Partial {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            declarations: self.declarations.clone(),
            installed: self.installed.clone(),
            next_order: self.next_order,
        }
    }
}

impl Partial {
    pub fn new() -> Self {
        Self {
            id: PartialId::next(),
            declarations: Vec::new(),
            installed: HashSet::new(),
            next_order: 0,
        }
    }

    pub fn id(&self) -> PartialId {
        self.id
    }

    fn push(&mut self, target: TypeInfo, kind: BindingKind) {
        let order = self.next_order;
        self.next_order += 1;
        self.declarations.push(Declaration {
            target,
            kind,
            order,
            origin: self.id,
        });
    }

    /// Registers `Impl` as constructible via its [`Buildable`] impl, binding
    /// it to itself. Call `.bind::<Iface, Impl>()` afterwards to also expose
    /// it under a trait object interface.
    pub fn add<Impl>(mut self) -> Self
    where
        Impl: Buildable,
    {
        let signature = Impl::signature();
        let thunk: ConstructorThunk = Arc::new(|injector: &Injector| {
            let value = Impl::construct(injector)?;
            Ok(Arc::new(value) as Arc<dyn Any + Send + Sync>)
        });
        self.push(
            TypeInfo::of::<Impl>(),
            BindingKind::Constructor { signature, thunk },
        );
        self
    }

    /// Registers an arbitrary constructor by explicit [`Signature`], for
    /// hosts without access to the `Buildable` macro.
    pub fn add_provider<T: 'static + Send + Sync>(
        mut self,
        signature: Signature,
        thunk: impl Fn(&Injector) -> Result<T, InjectionError> + Send + Sync + 'static,
    ) -> Self {
        let thunk: ConstructorThunk =
            Arc::new(move |injector| Ok(Arc::new(thunk(injector)?) as Arc<dyn Any + Send + Sync>));
        self.push(TypeInfo::of::<T>(), BindingKind::Provider { signature, thunk });
        self
    }

    /// Binds an interface `Iface` to an already-registered implementation
    /// `Impl`. Resolved at seal time by the alias-resolution pass: `Iface`
    /// never gets its own entry in the sealed `BindingMap`, it forwards to
    /// whatever `Impl` resolves to.
    pub fn bind<Iface, Impl>(mut self) -> Self
    where
        Iface: 'static + ?Sized,
        Impl: 'static + Send + Sync + Unsize<Iface>,
    {
        let caster = crate::binding::TypeCaster::<Iface> {
            cast_arc: |v| {
                // SAFETY: only ever invoked on an `Any` known by construction
                // to actually hold an `Impl`, since `BindTo::caster` is read
                // back out exactly where `implementation`'s produced instance
                // is in hand.
                let concrete: Arc<Impl> = v.downcast().unwrap();
                concrete as Arc<Iface>
            },
        };

        self.push(
            TypeInfo::of::<Iface>(),
            BindingKind::BindTo {
                implementation: TypeInfo::of::<Impl>(),
                caster: Arc::new(caster),
            },
        );
        self
    }

    /// Binds `T` to a fixed external instance. Never rebuilt, never torn
    /// down by the injector — ownership stays with whoever constructed it.
    pub fn bind_instance<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.push(
            TypeInfo::of::<T>(),
            BindingKind::Instance {
                instance: Arc::new(instance),
            },
        );
        self
    }

    /// Registers an assisted factory for `T`, constructed from `signature`
    /// (whose `Assisted` params are supplied by the caller at factory-call
    /// time rather than resolved from the container) and `thunk`.
    pub fn add_factory<T: 'static + Send + Sync>(
        mut self,
        signature: Signature,
        thunk: impl Fn(&Injector, Vec<Box<dyn Any>>) -> Result<T, InjectionError> + Send + Sync + 'static,
    ) -> Self {
        let thunk: FactoryThunk = Arc::new(move |injector, args| {
            Ok(Arc::new(thunk(injector, args)?) as Arc<dyn Any + Send + Sync>)
        });
        self.push(TypeInfo::of::<T>(), BindingKind::Factory { signature, thunk });
        self
    }

    /// Contributes `Impl` to the multibinding set for interface `Iface`.
    /// Many `Impl`s can contribute to the same `Iface`; each gets its own entry, cast to
    /// `Arc<Iface>` on retrieval the same way `bind::<Iface, Impl>()` casts
    /// a regular binding — `Iface` is usually a trait object, so grouping
    /// contributions has to happen by the shared interface key, not by each
    /// contributor's own (necessarily distinct) concrete `TypeId`.
    pub fn add_multibinding<Iface, Impl>(
        mut self,
        signature: Signature,
        thunk: impl Fn(&Injector) -> Result<Impl, InjectionError> + Send + Sync + 'static,
    ) -> Self
    where
        Iface: 'static + ?Sized,
        Impl: 'static + Send + Sync + Unsize<Iface>,
    {
        let caster = crate::binding::TypeCaster::<Iface> {
            cast_arc: |v| {
                // SAFETY: only ever invoked on an `Any` known by construction
                // to hold an `Impl`, mirroring `bind`'s caster.
                let concrete: Arc<Impl> = v.downcast().unwrap();
                concrete as Arc<Iface>
            },
        };

        let element = TypeInfo::of::<Iface>();
        let ctor_thunk: ConstructorThunk =
            Arc::new(move |injector| Ok(Arc::new(thunk(injector)?) as Arc<dyn Any + Send + Sync>));
        self.push(
            element,
            BindingKind::Multibinding {
                element,
                signature,
                thunk: ctor_thunk,
                caster: Arc::new(caster),
            },
        );
        self
    }

    /// Merges `other`'s declarations into `self`. Installing the same
    /// `Partial` (by identity) a second time, directly or transitively
    /// through some other installed `Partial`, is a no-op rather than a
    /// duplicate-binding error: every
    /// declaration `other` carries is tagged with the id of the `Partial`
    /// that originally created it (`Declaration::origin`), so a diamond —
    /// `top.install(left).install(right)` where both `left` and `right`
    /// earlier installed clones of the same `shared` — only merges
    /// `shared`'s declarations once, no matter which branch they arrive
    /// through.
    pub fn install(mut self, other: Partial) -> Self {
        if self.installed.contains(&other.id) || other.id == self.id {
            return self;
        }

        let mut already = self.installed.clone();
        already.insert(self.id);

        self.push(
            TypeInfo::of::<()>(),
            BindingKind::Install { source: other.id },
        );
        self.installed.insert(other.id);
        self.installed.extend(other.installed.iter().copied());

        for mut decl in other.declarations {
            if already.contains(&decl.origin) {
                continue;
            }
            decl.order += self.next_order;
            self.declarations.push(decl);
        }
        self.next_order = self.declarations.iter().map(|d| d.order + 1).max().unwrap_or(0);

        self
    }

    /// Runs the component compiler over the accumulated declarations,
    /// producing a sealed [`crate::component::Component`] or a structured
    /// [`crate::errors::SealError`] describing the first validation failure
    /// found.
    pub fn seal(self) -> Result<crate::component::Component, crate::errors::SealError> {
        crate::compiler::compile(self)
    }
}

impl std::fmt::Debug for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partial")
            .field("id", &self.id)
            .field("declarations", &self.declarations.len())
            .finish()
    }
}
