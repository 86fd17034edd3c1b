use std::any::TypeId;
use std::marker::PhantomData;

/////////////////////////////////////////////////////////////////////////////////////////

/// A [`TypeId`] paired with a printable name, threaded through every
/// diagnostic so structured errors never need a symbol table to be readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: &'static str,
}

impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Wraps `T` with a distinguishing `Tag` so that `Annotated<Tag, T>` and `T`
/// produce distinct [`TypeId`]s: the same underlying type annotated with
/// two different tags is two different binding keys.
pub struct Annotated<Tag, T: ?Sized> {
    _tag: PhantomData<Tag>,
    _inner: PhantomData<T>,
}

impl<Tag: 'static, T: 'static + ?Sized> Annotated<Tag, T> {
    pub fn type_info() -> TypeInfo {
        TypeInfo::of::<Annotated<Tag, T>>()
    }
}

/////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotated_types_are_distinct_from_unannotated() {
        struct TagA;
        struct TagB;

        let plain = TypeInfo::of::<i32>();
        let a = Annotated::<TagA, i32>::type_info();
        let b = Annotated::<TagB, i32>::type_info();

        assert_ne!(plain.id, a.id);
        assert_ne!(a.id, b.id);
        assert_ne!(plain.id, b.id);
    }
}
