use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::binding::FactoryThunk;
use crate::errors::{AssistedArgMismatchError, InjectionError};
use crate::injector::Injector;
use crate::signature::Signature;
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

/// An assisted factory bound to a live [`Injector`]: everything `T`'s
/// constructor needs that *isn't* assisted is already resolved from the
/// container, captured at the moment the factory itself was built. Calling
/// `build`/`build_any` supplies only the assisted arguments.
///
/// Cloning a `Factory` clones the underlying `Injector` handle (an `Arc`
/// clone), so every clone shares the same memoized instances.
#[derive(Clone)]
pub struct Factory<T: 'static + Send + Sync> {
    injector: Injector,
    signature: Signature,
    thunk: FactoryThunk,
    _product: PhantomData<fn() -> T>,
}

impl<T: 'static + Send + Sync> Factory<T> {
    pub(crate) fn new(injector: Injector, signature: Signature, thunk: FactoryThunk) -> Self {
        Self {
            injector,
            signature,
            thunk,
            _product: PhantomData,
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Builds `T` from its assisted arguments, boxed in declaration order.
    /// The `weft-macros` `#[derive(Buildable)]` façade generates a typed
    /// `build(a, b, ...)` wrapper around this for hosts that don't want to
    /// box arguments by hand.
    pub fn build_any(&self, args: Vec<Box<dyn Any>>) -> Result<Arc<T>, InjectionError> {
        let instance = (self.thunk)(&self.injector, args)?;
        // SAFETY: every `Factory<T>` is constructed from a `FactoryThunk`
        // registered against `T`'s own `TypeInfo`, so the thunk always
        // produces a `T`.
        Ok(instance.downcast().unwrap())
    }

    /// Convenience for the common single-assisted-argument case.
    pub fn build1<A: 'static>(&self, a: A) -> Result<Arc<T>, InjectionError> {
        self.check_assisted_arg::<A>(0)?;
        self.build_any(vec![Box::new(a)])
    }

    /// Convenience for the common two-assisted-argument case.
    pub fn build2<A: 'static, B: 'static>(&self, a: A, b: B) -> Result<Arc<T>, InjectionError> {
        self.check_assisted_arg::<A>(0)?;
        self.check_assisted_arg::<B>(1)?;
        self.build_any(vec![Box::new(a), Box::new(b)])
    }

    fn check_assisted_arg<A: 'static>(&self, index: usize) -> Result<(), InjectionError> {
        let Some(param) = self.signature.assisted_params().nth(index) else {
            return Ok(());
        };
        if param.ty.id != TypeInfo::of::<A>().id {
            return Err(InjectionError::AssistedArgMismatch(AssistedArgMismatchError {
                factory_type: self.signature.target,
                param_index: index,
                expected: param.ty,
            }));
        }
        Ok(())
    }
}
