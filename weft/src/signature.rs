use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// Whether a [`Signature`] parameter is resolved from the container
/// (`Injected`) or supplied by the caller at factory-invocation time
/// (`Assisted`). Only `Injected` parameters are edges in the
/// injected-dependency graph the compiler walks for closure and cycle
/// checks — assisted parameters deliberately break cycles, since they're
/// never resolved from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Injected,
    Assisted,
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct ParamInfo {
    pub ty: TypeInfo,
    pub kind: ParamKind,
}

impl ParamInfo {
    pub fn injected(ty: TypeInfo) -> Self {
        Self {
            ty,
            kind: ParamKind::Injected,
        }
    }

    pub fn assisted(ty: TypeInfo) -> Self {
        Self {
            ty,
            kind: ParamKind::Assisted,
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Descriptor of a callable: the type it returns plus its ordered parameter
/// list. This is purely descriptive metadata consumed by the compiler for
/// validation (closure check, cycle detection) — the actual executable code
/// lives in the binding's thunk, kept separate so the compiler never needs to
/// invoke anything to reason about the graph.
#[derive(Debug, Clone)]
pub struct Signature {
    pub target: TypeInfo,
    pub params: Vec<ParamInfo>,
}

impl Signature {
    pub fn new(target: TypeInfo, params: Vec<ParamInfo>) -> Self {
        Self { target, params }
    }

    pub fn nullary(target: TypeInfo) -> Self {
        Self {
            target,
            params: Vec::new(),
        }
    }

    pub fn injected_params(&self) -> impl Iterator<Item = &ParamInfo> {
        self.params.iter().filter(|p| p.kind == ParamKind::Injected)
    }

    pub fn assisted_params(&self) -> impl Iterator<Item = &ParamInfo> {
        self.params.iter().filter(|p| p.kind == ParamKind::Assisted)
    }
}
