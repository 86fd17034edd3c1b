use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use multimap::MultiMap;

use crate::binding::BindingKind;
use crate::component::{AliasEntry, BindingMap, Component, MultibindingEntry, ResolvedBinding, ResolvedKind};
use crate::errors::{AliasCycleError, CyclicDependencyError, DuplicateBindingError, MissingBindingError, SealError};
use crate::partial::Partial;
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// Compiles a [`Partial`]'s declarations into a sealed [`Component`],
/// running the full validation pipeline: index by
/// target, reject true duplicates, resolve every `BindTo` alias chain, check
/// that every injected dependency closes over a real binding, and confirm
/// the resulting produces-graph has no cycle. The first failure found is
/// returned; validation does not try to collect every error in one pass.
#[cfg_attr(feature = "logging", tracing::instrument(level = "debug", skip_all))]
pub(crate) fn compile(partial: Partial) -> Result<Component, SealError> {
    let mut by_target: HashMap<TypeId, Vec<usize>> = HashMap::new();
    let mut multibindings_idx: MultiMap<TypeId, usize> = MultiMap::new();
    let decls = partial.declarations;

    for (i, decl) in decls.iter().enumerate() {
        match &decl.kind {
            BindingKind::Install { .. } => {}
            BindingKind::Multibinding { element, .. } => {
                multibindings_idx.insert(element.id, i);
            }
            _ => {
                by_target.entry(decl.target.id).or_default().push(i);
            }
        }
    }

    // Reject duplicates, keeping only a single surviving declaration per
    // target. Identical `BindTo` repeats are allowed through (installing the
    // same interface binding via two diamond-shaped paths is not an error),
    // everything else with more than one declaration is.
    let mut surviving: HashMap<TypeId, usize> = HashMap::new();
    for (target_id, idxs) in &by_target {
        if idxs.len() == 1 {
            surviving.insert(*target_id, idxs[0]);
            continue;
        }

        let all_same_bindto = idxs.iter().all(|&i| match &decls[i].kind {
            BindingKind::BindTo { implementation, .. } => match &decls[idxs[0]].kind {
                BindingKind::BindTo { implementation: first, .. } => implementation.id == first.id,
                _ => false,
            },
            _ => false,
        });

        if all_same_bindto {
            surviving.insert(*target_id, idxs[0]);
        } else {
            return Err(SealError::DuplicateBinding(DuplicateBindingError {
                target: decls[idxs[0]].target,
            }));
        }
    }

    // Resolve every BindTo chain down to a terminal (non-BindTo) target,
    // carrying along the caster that turns the terminal's instance into the
    // interface type the chain started from.
    let mut alias_of: HashMap<TypeId, TypeId> = HashMap::new();
    let mut alias_casters: HashMap<TypeId, Arc<dyn Any + Send + Sync>> = HashMap::new();
    for (&target_id, &idx) in &surviving {
        if let BindingKind::BindTo { caster, .. } = &decls[idx].kind {
            let canonical = resolve_alias_chain(target_id, &surviving, &decls)?;
            alias_of.insert(target_id, canonical);
            alias_casters.insert(target_id, caster.clone());
        }
    }

    let canonical_of = |ty: TypeId| -> TypeId { *alias_of.get(&ty).unwrap_or(&ty) };

    // Build the terminal (non-BindTo) resolved bindings.
    let mut resolved: HashMap<TypeId, Arc<ResolvedBinding>> = HashMap::new();
    for (&target_id, &idx) in &surviving {
        let decl = &decls[idx];
        let kind = match &decl.kind {
            BindingKind::BindTo { .. } => continue,
            BindingKind::Constructor { signature, thunk } | BindingKind::Provider { signature, thunk } => {
                ResolvedKind::Constructor {
                    signature: signature.clone(),
                    thunk: thunk.clone(),
                }
            }
            BindingKind::Instance { instance } => ResolvedKind::Instance {
                instance: instance.clone(),
            },
            BindingKind::Factory { signature, thunk } => ResolvedKind::Factory {
                signature: signature.clone(),
                thunk: thunk.clone(),
            },
            BindingKind::Multibinding { .. } | BindingKind::Install { .. } => unreachable!(),
        };
        resolved.insert(
            target_id,
            Arc::new(ResolvedBinding {
                target: decl.target,
                kind,
            }),
        );
    }

    // Closure check: every injected parameter of every terminal binding must
    // resolve to something in `resolved` (through the alias map).
    for binding in resolved.values() {
        check_closure(binding, &resolved, &canonical_of)?;
    }

    // Multibindings: resolve every contribution in declaration order, and
    // closure check each contributor's own injected parameters.
    let mut multibindings: MultiMap<TypeId, MultibindingEntry> = MultiMap::new();
    for (&element_id, idxs) in multibindings_idx.iter_all() {
        let mut group: Vec<_> = idxs.clone();
        group.sort_by_key(|&i| decls[i].order);

        for i in group {
            let decl = &decls[i];
            let BindingKind::Multibinding { element, signature, thunk, caster } = &decl.kind else {
                unreachable!()
            };
            let binding = Arc::new(ResolvedBinding {
                target: signature.target,
                kind: ResolvedKind::Constructor {
                    signature: signature.clone(),
                    thunk: thunk.clone(),
                },
            });
            check_closure(&binding, &resolved, &canonical_of)?;
            multibindings.insert(element_id, MultibindingEntry { element: *element, binding, caster: caster.clone() });
        }
    }

    // Cycle detection over the produces-graph: nodes are canonical terminal
    // targets, edges are injected dependencies.
    detect_cycles(&resolved, &canonical_of)?;

    // Materialize the alias table so `Injector::get::<Iface>()` can find its
    // canonical implementation and the caster to reach it with.
    let mut aliases = HashMap::new();
    for (&alias_id, &canonical_id) in &alias_of {
        let idx = surviving[&alias_id];
        aliases.insert(
            alias_id,
            AliasEntry {
                iface: decls[idx].target,
                canonical: canonical_id,
                caster: alias_casters[&alias_id].clone(),
            },
        );
    }

    Ok(Component::new(BindingMap {
        entries: resolved,
        aliases,
        multibindings,
    }))
}

/////////////////////////////////////////////////////////////////////////////////////////

fn resolve_alias_chain(
    start: TypeId,
    surviving: &HashMap<TypeId, usize>,
    decls: &[crate::binding::Declaration],
) -> Result<TypeId, SealError> {
    let start_decl = &decls[*surviving.get(&start).unwrap()];
    let mut path: Vec<TypeInfo> = vec![start_decl.target];
    let mut current = start;

    loop {
        let idx = *surviving.get(&current).unwrap();
        let BindingKind::BindTo { implementation, .. } = &decls[idx].kind else {
            return Ok(current);
        };

        if path.iter().any(|t| t.id == implementation.id) {
            path.push(*implementation);
            return Err(SealError::AliasCycle(AliasCycleError { path }));
        }

        if !surviving.contains_key(&implementation.id) {
            return Err(SealError::MissingBinding(MissingBindingError {
                dependant: decls[idx].target,
                dependency: *implementation,
            }));
        }

        path.push(*implementation);
        current = implementation.id;
    }
}

fn check_closure(
    binding: &ResolvedBinding,
    resolved: &HashMap<TypeId, Arc<ResolvedBinding>>,
    canonical_of: &impl Fn(TypeId) -> TypeId,
) -> Result<(), SealError> {
    let signature = match &binding.kind {
        ResolvedKind::Constructor { signature, .. } | ResolvedKind::Factory { signature, .. } => signature,
        ResolvedKind::Instance { .. } => return Ok(()),
    };

    for param in signature.injected_params() {
        let canonical = canonical_of(param.ty.id);
        if !resolved.contains_key(&canonical) {
            return Err(SealError::MissingBinding(MissingBindingError {
                dependant: signature.target,
                dependency: param.ty,
            }));
        }
    }
    Ok(())
}

fn detect_cycles(
    resolved: &HashMap<TypeId, Arc<ResolvedBinding>>,
    canonical_of: &impl Fn(TypeId) -> TypeId,
) -> Result<(), SealError> {
    #[derive(PartialEq, Eq, Clone, Copy)]
    enum Mark {
        Gray,
        Black,
    }

    let mut marks: HashMap<TypeId, Mark> = HashMap::new();
    let mut stack: Vec<TypeInfo> = Vec::new();

    fn visit(
        node: TypeId,
        resolved: &HashMap<TypeId, Arc<ResolvedBinding>>,
        canonical_of: &impl Fn(TypeId) -> TypeId,
        marks: &mut HashMap<TypeId, Mark>,
        stack: &mut Vec<TypeInfo>,
    ) -> Result<(), SealError> {
        match marks.get(&node) {
            Some(Mark::Black) => return Ok(()),
            Some(Mark::Gray) => {
                let start = stack.iter().position(|t| t.id == node).unwrap_or(0);
                let mut path: Vec<TypeInfo> = stack[start..].to_vec();
                path.push(resolved[&node].target);
                return Err(SealError::CyclicDependency(CyclicDependencyError { path }));
            }
            None => {}
        }

        let Some(binding) = resolved.get(&node) else {
            return Ok(());
        };

        marks.insert(node, Mark::Gray);
        stack.push(binding.target);

        let deps: Vec<TypeId> = match &binding.kind {
            ResolvedKind::Constructor { signature, .. } | ResolvedKind::Factory { signature, .. } => {
                signature.injected_params().map(|p| canonical_of(p.ty.id)).collect()
            }
            ResolvedKind::Instance { .. } => Vec::new(),
        };

        for dep in deps {
            visit(dep, resolved, canonical_of, marks, stack)?;
        }

        stack.pop();
        marks.insert(node, Mark::Black);
        Ok(())
    }

    let nodes: HashSet<TypeId> = resolved.keys().copied().collect();
    for node in nodes {
        visit(node, resolved, canonical_of, &mut marks, &mut stack)?;
    }
    Ok(())
}
