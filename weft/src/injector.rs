use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::binding::TypeCaster;
use crate::component::{Component, ResolvedBinding, ResolvedKind};
use crate::diagnostics::InjectionStack;
use crate::errors::{FactoryProductRequestedError, InjectionError, RuntimeCycleError};
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// A live instantiation of a sealed [`Component`]: owns the memo table
/// instances get cached into and the order they were built in, so dropping
/// the injector tears them down in reverse of construction order.
/// Cheap to clone — clones share the same memo table and the same
/// instances, which is exactly what an assisted [`crate::factory::Factory`]
/// needs when it captures one.
#[derive(Clone)]
pub struct Injector(Arc<InjectorInner>);

struct InjectorInner {
    component: Component,
    memo: Mutex<std::collections::HashMap<usize, Arc<dyn Any + Send + Sync>>>,
    built_order: Mutex<Vec<Arc<dyn Any + Send + Sync>>>,
    /// Bindings currently mid-construction, keyed by the same pointer
    /// identity `resolve` memoizes under. Checked defensively on every
    /// `resolve` call — compile-time cycle
    /// detection over each `Signature`'s declared params already rules this
    /// out for any binding whose `construct` body only touches what it
    /// declares. A `Mutex`, not a `RefCell`, because `Injector` clones (e.g.
    /// one captured per `Factory`) can cross thread boundaries.
    in_progress: Mutex<HashSet<usize>>,
    /// The same construction in progress as `in_progress`, but ordered
    /// outermost-first, purely so a failed resolution can report *which*
    /// chain of types it was in the middle of building (`InjectionStack`).
    building: Mutex<Vec<TypeInfo>>,
}

impl Injector {
    /// Builds a fresh injector over an already-sealed `Component`. Infallible:
    /// every failure mode a `Component` could have was already ruled out by
    /// `Partial::seal`.
    pub fn new(component: Component) -> Self {
        Self(Arc::new(InjectorInner {
            component,
            memo: Mutex::new(std::collections::HashMap::new()),
            built_order: Mutex::new(Vec::new()),
            in_progress: Mutex::new(HashSet::new()),
            building: Mutex::new(Vec::new()),
        }))
    }

    /// Resolves `T`, building and memoizing it on first use. Subsequent
    /// calls for the same `T` on the same injector return the same `Arc`.
    #[cfg_attr(feature = "logging", tracing::instrument(level = "debug", skip(self), fields(ty = std::any::type_name::<T>())))]
    pub fn get<T: 'static + ?Sized>(&self) -> Result<Arc<T>, InjectionError> {
        let type_id = TypeId::of::<T>();

        if let Some(binding) = self.0.component.bindings.entries.get(&type_id).cloned() {
            let any = self.resolve(&binding)?;
            // SAFETY: `entries` keys are exactly the `TypeId`s of the Sized
            // concrete type each binding's thunk produces, so a hit here
            // guarantees `any` actually holds a `T`.
            return Ok(any.downcast().unwrap());
        }

        if let Some(alias) = self.0.component.bindings.aliases.get(&type_id) {
            let canonical = self
                .0
                .component
                .bindings
                .entries
                .get(&alias.canonical)
                .cloned()
                .expect("alias canonical target always has an entry, guaranteed at seal time");
            let any = self.resolve(&canonical)?;
            let caster: &TypeCaster<T> = alias
                .caster
                .downcast_ref()
                .expect("alias caster type matches the interface it was registered for");
            return Ok((caster.cast_arc)(any));
        }

        Err(InjectionError::unregistered(TypeInfo::of::<T>(), self.injection_stack_for(TypeInfo::of::<T>())))
    }

    /// Resolves every contribution to the multibinding set for interface
    /// `Element`, in the order they were declared. Returns
    /// an empty vector if nothing ever contributed to `Element` — an empty
    /// multibinding set is a valid outcome, not an error.
    pub fn get_multibindings<Element: 'static + ?Sized>(&self) -> Result<Vec<Arc<Element>>, InjectionError> {
        let type_id = TypeId::of::<Element>();
        let Some(entries) = self.0.component.bindings.multibindings.get_vec(&type_id) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            let any = self.resolve(&entry.binding)?;
            let caster: &TypeCaster<Element> = entry
                .caster
                .downcast_ref()
                .expect("multibinding caster type matches the interface it was registered for");
            out.push((caster.cast_arc)(any));
        }
        Ok(out)
    }

    /// Resolves `T`'s assisted factory, capturing a clone of this injector
    /// for every non-assisted parameter the factory needs when called.
    pub fn get_factory<T: 'static + Send + Sync>(&self) -> Result<crate::factory::Factory<T>, InjectionError> {
        let type_id = TypeId::of::<T>();
        let binding = self
            .0
            .component
            .bindings
            .entries
            .get(&type_id)
            .cloned()
            .ok_or_else(|| InjectionError::unregistered(TypeInfo::of::<T>(), self.injection_stack_for(TypeInfo::of::<T>())))?;

        let ResolvedKind::Factory { signature, thunk } = &binding.kind else {
            return Err(InjectionError::unregistered(TypeInfo::of::<T>(), self.injection_stack_for(TypeInfo::of::<T>())));
        };

        Ok(crate::factory::Factory::new(self.clone(), signature.clone(), thunk.clone()))
    }

    pub(crate) fn resolve(&self, binding: &Arc<ResolvedBinding>) -> Result<Arc<dyn Any + Send + Sync>, InjectionError> {
        if let ResolvedKind::Factory { .. } = &binding.kind {
            // A `Factory` entry is a legitimate `BindingMap` key — it passes
            // the seal-time closure check like anything else a `Constructor`
            // can inject — but `resolve` only knows how to call a thunk with
            // no arguments. Reject before touching `memo`/`in_progress` so a
            // caller who meant `get_factory` gets a clean error instead of a
            // panic, whether they asked directly or some other binding tried
            // to inject this one.
            return Err(InjectionError::FactoryProductRequested(FactoryProductRequestedError {
                target: binding.target,
            }));
        }

        let key = Arc::as_ptr(binding) as *const () as usize;

        if let Some(existing) = self.0.memo.lock().unwrap().get(&key) {
            return Ok(existing.clone());
        }

        if !self.0.in_progress.lock().unwrap().insert(key) {
            return Err(InjectionError::RuntimeCycle(RuntimeCycleError {
                re_entered: binding.target,
            }));
        }
        self.0.building.lock().unwrap().push(binding.target);

        let result = match &binding.kind {
            ResolvedKind::Instance { instance } => Ok(instance.clone()),
            ResolvedKind::Constructor { thunk, .. } => thunk(self),
            ResolvedKind::Factory { .. } => unreachable!("filtered out above"),
        };

        self.0.in_progress.lock().unwrap().remove(&key);
        self.0.building.lock().unwrap().pop();
        let instance = result?;

        self.0.memo.lock().unwrap().insert(key, instance.clone());
        // `Instance` bindings are addressable through `memo` like everything
        // else, but they are never the container's to tear down — ownership
        // stays with whoever constructed them. Only constructed bindings
        // join the reverse-teardown stack.
        if !matches!(binding.kind, ResolvedKind::Instance { .. }) {
            self.0.built_order.lock().unwrap().push(instance.clone());
        }
        Ok(instance)
    }

    pub(crate) fn component(&self) -> &Component {
        &self.0.component
    }

    /// Snapshots the live construction stack and renders it as an
    /// [`InjectionStack`] describing the path that led to requesting
    /// `missing`, for use in an [`InjectionError`] raised mid-resolution.
    fn injection_stack_for(&self, missing: TypeInfo) -> InjectionStack {
        let building = self.0.building.lock().unwrap().clone();
        InjectionStack::from_path(&building, missing)
    }
}

impl Drop for InjectorInner {
    fn drop(&mut self) {
        // The memo table holds its own clone of every instance, so clear it
        // first: otherwise popping `built_order` wouldn't release the last
        // strong reference and instances would drop in the HashMap's
        // unspecified order instead. With only `built_order` left holding
        // references, popping it tears instances down in reverse of the
        // order they were built, so a dependency always outlives its
        // dependants.
        self.memo.lock().unwrap().clear();
        let mut built = self.built_order.lock().unwrap();
        while built.pop().is_some() {}
    }
}
