use std::sync::Arc;

use weft::{Buildable, Injector, InjectionError, ParamInfo, Partial, SealError, Signature, TypeInfo};

struct A {
    #[allow(dead_code)]
    b: Arc<B>,
}

struct B {
    #[allow(dead_code)]
    a: Arc<A>,
}

impl Buildable for A {
    fn signature() -> Signature {
        Signature::new(TypeInfo::of::<A>(), vec![ParamInfo::injected(TypeInfo::of::<B>())])
    }

    fn construct(injector: &Injector) -> Result<Self, InjectionError> {
        Ok(Self { b: injector.get::<B>()? })
    }
}

impl Buildable for B {
    fn signature() -> Signature {
        Signature::new(TypeInfo::of::<B>(), vec![ParamInfo::injected(TypeInfo::of::<A>())])
    }

    fn construct(injector: &Injector) -> Result<Self, InjectionError> {
        Ok(Self { a: injector.get::<A>()? })
    }
}

#[test]
fn a_depends_on_b_depends_on_a_is_rejected_at_seal_time() {
    let result = Partial::new().add::<A>().add::<B>().seal();

    match result {
        Err(SealError::CyclicDependency(e)) => {
            assert!(e.path.len() >= 2, "cycle path should name at least the two types involved");
        }
        Err(other) => panic!("expected CyclicDependency, got {other:?}"),
        Ok(_) => panic!("expected CyclicDependency, seal succeeded"),
    }
}

// A factory's assisted parameters are not edges in the injected-dependency
// graph, so a self-reference through a factory does not trip the cycle
// detector.
struct Node {
    #[allow(dead_code)]
    value: i32,
}

#[test]
fn assisted_self_reference_through_a_factory_does_not_cycle() {
    let component = Partial::new()
        .add_factory::<Node>(
            Signature::new(TypeInfo::of::<Node>(), vec![ParamInfo::assisted(TypeInfo::of::<i32>())]),
            |_injector, mut args| {
                let value = *args.remove(0).downcast::<i32>().unwrap();
                Ok(Node { value })
            },
        )
        .seal();

    assert!(component.is_ok(), "assisted params must not be treated as graph edges");
}
