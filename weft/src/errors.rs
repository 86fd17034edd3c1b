use thiserror::Error;

use crate::diagnostics::InjectionStack;
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// Everything that can go wrong while compiling a [`crate::partial::Partial`]
/// into a sealed [`crate::component::Component`]. Every variant
/// is a validation failure the compiler can prove statically from the
/// declarations alone — nothing here depends on actually constructing
/// anything.
#[derive(Error, Debug, Clone)]
pub enum SealError {
    #[error(transparent)]
    DuplicateBinding(DuplicateBindingError),
    #[error(transparent)]
    MissingBinding(MissingBindingError),
    #[error(transparent)]
    AliasCycle(AliasCycleError),
    #[error(transparent)]
    CyclicDependency(CyclicDependencyError),
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone)]
pub struct DuplicateBindingError {
    pub target: TypeInfo,
}

impl std::fmt::Display for DuplicateBindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duplicate binding for type: {}", self.target.name)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone)]
pub struct MissingBindingError {
    pub dependant: TypeInfo,
    pub dependency: TypeInfo,
}

impl std::fmt::Display for MissingBindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requires {}, but no binding provides it",
            self.dependant.name, self.dependency.name
        )
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone)]
pub struct AliasCycleError {
    pub path: Vec<TypeInfo>,
}

impl std::fmt::Display for AliasCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BindTo chain forms a cycle: ")?;
        for (i, ty) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", ty.name)?;
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone)]
pub struct CyclicDependencyError {
    pub path: Vec<TypeInfo>,
}

impl std::fmt::Display for CyclicDependencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cyclic dependency: ")?;
        for (i, ty) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", ty.name)?;
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Everything that can go wrong while an [`crate::injector::Injector`] is
/// actually constructing an instance. Narrower than [`SealError`] since the
/// compiler already proved closure and acyclicity before a `Component` could
/// exist — what's left are failures a static check can't rule out: asking
/// for a type that was genuinely never bound, a user thunk returning its own
/// error, or an assisted factory called with the wrong argument shape.
#[derive(Error, Debug, Clone)]
pub enum InjectionError {
    #[error(transparent)]
    Unregistered(UnregisteredTypeError),
    #[error(transparent)]
    AssistedArgMismatch(AssistedArgMismatchError),
    #[error(transparent)]
    RuntimeCycle(RuntimeCycleError),
    #[error(transparent)]
    FactoryProductRequested(FactoryProductRequestedError),
}

impl InjectionError {
    pub fn unregistered(dep_type: TypeInfo, injection_stack: InjectionStack) -> Self {
        Self::Unregistered(UnregisteredTypeError { dep_type, injection_stack })
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone)]
pub struct UnregisteredTypeError {
    pub dep_type: TypeInfo,
    pub injection_stack: InjectionStack,
}

impl std::fmt::Display for UnregisteredTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Unregistered type: {}", self.dep_type.name)?;
        write!(f, "Injection stack:\n{}", self.injection_stack)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone)]
pub struct AssistedArgMismatchError {
    pub factory_type: TypeInfo,
    pub param_index: usize,
    pub expected: TypeInfo,
}

impl std::fmt::Display for AssistedArgMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Factory for {} got the wrong type at assisted argument {}: expected {}",
            self.factory_type.name, self.param_index, self.expected.name
        )
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Raised when `Injector::get::<T>()` (or a `Constructor`/`Provider` that
/// injects `Arc<T>`) finds `T` bound as a [`crate::binding::BindingKind::Factory`].
/// A factory product is never constructed by `resolve` itself — only
/// [`crate::factory::Factory::build_any`] knows how to split assisted from
/// injected arguments — so asking for it through the plain `get` path can
/// never succeed, even though `T` is a legitimate `BindingMap` key that
/// passes the seal-time closure check.
#[derive(Error, Debug, Clone)]
pub struct FactoryProductRequestedError {
    pub target: TypeInfo,
}

impl std::fmt::Display for FactoryProductRequestedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is produced by an assisted factory; use get_factory::<{}>() instead of get::<{}>()",
            self.target.name, self.target.name, self.target.name
        )
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Defense in depth: `Partial::seal` already proves the
/// injected-dependency graph is acyclic, so this should be unreachable in
/// practice. It only fires if a hand-written [`crate::partial::Buildable`]
/// impl's `construct` body resolves a type that its own `signature()`
/// doesn't declare as an injected dependency, bypassing the compiler's cycle
/// check entirely.
#[derive(Error, Debug, Clone)]
pub struct RuntimeCycleError {
    pub re_entered: TypeInfo,
}

impl std::fmt::Display for RuntimeCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} was requested again while still being constructed; its Buildable::construct body \
             resolves a dependency its signature() doesn't declare",
            self.re_entered.name
        )
    }
}
