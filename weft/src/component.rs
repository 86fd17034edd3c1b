use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use multimap::MultiMap;

use crate::binding::{ConstructorThunk, FactoryThunk};
use crate::signature::Signature;
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// What the compiler settled on for one resolvable type, with every `BindTo`
/// chain already walked out — by the time a `ResolvedBinding`
/// exists, resolving it at injection time is a single thunk call away.
pub(crate) enum ResolvedKind {
    Constructor { signature: Signature, thunk: ConstructorThunk },
    Instance { instance: Arc<dyn Any + Send + Sync> },
    Factory { signature: Signature, thunk: FactoryThunk },
}

pub(crate) struct ResolvedBinding {
    pub target: TypeInfo,
    pub kind: ResolvedKind,
}

/////////////////////////////////////////////////////////////////////////////////////////

/// The output of the component compiler: every declared type resolved to
/// exactly one way of producing it, plus the ordered multibinding groups.
/// Immutable once built, and safe to share across threads (`Send + Sync`),
/// since it holds no construction state — that lives in the [`crate::injector::Injector`].
pub(crate) struct BindingMap {
    /// Concrete, Sized bindings keyed by their own `TypeId` — what a
    /// `Constructor`/`Instance`/`Provider`/`Factory` declaration produces
    /// directly, with no cast needed to hand it back.
    pub(crate) entries: HashMap<TypeId, Arc<ResolvedBinding>>,
    /// Interface `TypeId`s resolved through a `BindTo` chain, each pointing
    /// at the `entries` key holding its canonical implementation plus the
    /// erased `TypeCaster<Iface>` needed to turn that implementation's
    /// instance into `Arc<Iface>`.
    pub(crate) aliases: HashMap<TypeId, AliasEntry>,
    /// Multibinding contributions, keyed by element type and kept in
    /// declaration order (source order, not insertion order into this map) —
    /// a multi-value-per-key store, same shape the teacher reaches for
    /// `multimap::MultiMap` to model its own interface-to-builders index.
    pub(crate) multibindings: MultiMap<TypeId, MultibindingEntry>,
}

pub(crate) struct AliasEntry {
    pub iface: TypeInfo,
    pub canonical: TypeId,
    pub caster: Arc<dyn Any + Send + Sync>,
}

/// One resolved multibinding contribution plus the erased `TypeCaster` that
/// turns its (concrete) resolved instance into `Arc<element>` on retrieval,
/// the same scheme `AliasEntry` uses for `BindTo`. Carries its own `element`
/// `TypeInfo` rather than relying on the map key, since a `TypeId` alone
/// can't name itself in a diagnostic or a rendered graph.
pub(crate) struct MultibindingEntry {
    pub element: TypeInfo,
    pub binding: Arc<ResolvedBinding>,
    pub caster: Arc<dyn Any + Send + Sync>,
}

/////////////////////////////////////////////////////////////////////////////////////////

/// A sealed, validated binding graph. Cheap to clone (an `Arc` underneath),
/// immutable, and safe to share across many independent [`crate::injector::Injector`]s —
/// each injector gets its own memoization and construction state layered on
/// top of the same `Component`.
#[derive(Clone)]
pub struct Component {
    pub(crate) bindings: Arc<BindingMap>,
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("bindings", &self.bindings.entries.len())
            .field("aliases", &self.bindings.aliases.len())
            .field("multibindings", &self.bindings.multibindings.len())
            .finish()
    }
}

impl Component {
    pub(crate) fn new(bindings: BindingMap) -> Self {
        Self {
            bindings: Arc::new(bindings),
        }
    }

    /// Re-opens a sealed `Component` as a fresh [`crate::partial::Partial`] whose
    /// declarations reproduce every binding in this component. The escape
    /// hatch for hosts that need to `install()` an already-sealed component
    /// rather than the `Partial` it came from — uncommon, so it walks the
    /// resolved map back into `Constructor`/`Instance`/`Provider`/`Factory`/
    /// `Multibinding` declarations rather than preserving the original
    /// `BindTo` aliasing (those aliases are already baked into each entry's
    /// canonical target).
    pub fn reopen(&self) -> crate::partial::Partial {
        let mut partial = crate::partial::Partial::new();

        for binding in self.bindings.entries.values() {
            partial = reopen_single(partial, binding);
        }
        for (_, entry) in self.bindings.multibindings.iter() {
            partial = reopen_multibinding(partial, entry.element, entry);
        }
        for alias in self.bindings.aliases.values() {
            let Some(canonical_binding) = self.bindings.entries.get(&alias.canonical) else {
                continue;
            };
            partial = push_declaration(
                partial,
                alias.iface,
                crate::binding::BindingKind::BindTo {
                    implementation: canonical_binding.target,
                    caster: alias.caster.clone(),
                },
            );
        }

        partial
    }
}

fn reopen_single(partial: crate::partial::Partial, binding: &Arc<ResolvedBinding>) -> crate::partial::Partial {
    use crate::binding::{BindingKind, Declaration};

    let binding = binding.clone();
    let (target, kind) = match &binding.kind {
        ResolvedKind::Constructor { signature, thunk } => (
            binding.target,
            BindingKind::Constructor {
                signature: signature.clone(),
                thunk: thunk.clone(),
            },
        ),
        ResolvedKind::Instance { instance } => (
            binding.target,
            BindingKind::Instance {
                instance: instance.clone(),
            },
        ),
        ResolvedKind::Factory { signature, thunk } => (
            binding.target,
            BindingKind::Factory {
                signature: signature.clone(),
                thunk: thunk.clone(),
            },
        ),
    };

    push_declaration(partial, target, kind)
}

fn reopen_multibinding(
    partial: crate::partial::Partial,
    element: TypeInfo,
    entry: &MultibindingEntry,
) -> crate::partial::Partial {
    use crate::binding::BindingKind;

    let ResolvedKind::Constructor { signature, thunk } = &entry.binding.kind else {
        // Instance and Factory multibinding contributions are not produced
        // by this compiler today; only Constructor-shaped thunks reach
        // `add_multibinding`.
        unreachable!("multibinding contributions are always Constructor-shaped");
    };

    let kind = BindingKind::Multibinding {
        element,
        signature: signature.clone(),
        thunk: thunk.clone(),
        caster: entry.caster.clone(),
    };

    push_declaration(partial, element, kind)
}

fn push_declaration(
    mut partial: crate::partial::Partial,
    target: TypeInfo,
    kind: crate::binding::BindingKind,
) -> crate::partial::Partial {
    let order = partial.declarations.len();
    let origin = partial.id();
    partial.declarations.push(crate::binding::Declaration { target, kind, order, origin });
    partial
}
