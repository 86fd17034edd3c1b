use std::sync::Arc;

use weft::{Buildable, Injector, InjectionError, ParamInfo, Partial, Signature, TypeInfo};

#[derive(Buildable)]
struct Logger;

struct Request {
    id: i32,
    #[allow(dead_code)]
    logger: Arc<Logger>,
}

fn build_component() -> weft::Component {
    Partial::new()
        .add::<Logger>()
        .add_factory::<Request>(
            Signature::new(
                TypeInfo::of::<Request>(),
                vec![
                    ParamInfo::assisted(TypeInfo::of::<i32>()),
                    ParamInfo::injected(TypeInfo::of::<Logger>()),
                ],
            ),
            |injector, mut args| {
                let id = *args.remove(0).downcast::<i32>().unwrap();
                Ok(Request { id, logger: injector.get::<Logger>()? })
            },
        )
        .seal()
        .unwrap()
}

#[test]
fn each_call_is_fresh_but_shares_the_injected_singleton() {
    let injector = Injector::new(build_component());
    let factory = injector.get_factory::<Request>().unwrap();

    let first = factory.build1(42).unwrap();
    let second = factory.build1(42).unwrap();

    assert_eq!(first.id, 42);
    assert_eq!(second.id, 42);
    assert!(!Arc::ptr_eq(&first, &second), "each factory call must build a fresh instance");
    assert!(
        Arc::ptr_eq(&first.logger, &second.logger),
        "the factory's injected dependency must be the container's one singleton"
    );
}

#[test]
fn wrong_assisted_argument_type_is_rejected() {
    let injector = Injector::new(build_component());
    let factory = injector.get_factory::<Request>().unwrap();

    let err = factory.build1("not an i32").unwrap_err();
    assert!(matches!(err, InjectionError::AssistedArgMismatch(_)));
}

#[test]
fn factory_outlives_the_injector_handle_that_created_it() {
    let factory = {
        let injector = Injector::new(build_component());
        injector.get_factory::<Request>().unwrap()
    };

    let request = factory.build1(7).unwrap();
    assert_eq!(request.id, 7);
}

#[test]
fn get_on_a_factory_bound_type_errors_instead_of_panicking() {
    let injector = Injector::new(build_component());
    let err = injector.get::<Request>().unwrap_err();
    assert!(matches!(err, InjectionError::FactoryProductRequested(_)));
}

// A `Constructor` that injects a factory-produced type passes the seal-time
// closure check (`Request` is a real `BindingMap` key) but must fail cleanly
// at resolution time rather than panic, since only `Factory::build*` knows
// how to split assisted from injected arguments.
struct Handler {
    #[allow(dead_code)]
    request: Arc<Request>,
}

impl weft::Buildable for Handler {
    fn signature() -> Signature {
        Signature::new(TypeInfo::of::<Handler>(), vec![ParamInfo::injected(TypeInfo::of::<Request>())])
    }

    fn construct(injector: &Injector) -> Result<Self, InjectionError> {
        Ok(Self { request: injector.get::<Request>()? })
    }
}

#[test]
fn injecting_a_factory_product_as_a_plain_dependency_errors_instead_of_panicking() {
    let component = Partial::new()
        .add::<Logger>()
        .add_factory::<Request>(
            Signature::new(
                TypeInfo::of::<Request>(),
                vec![
                    ParamInfo::assisted(TypeInfo::of::<i32>()),
                    ParamInfo::injected(TypeInfo::of::<Logger>()),
                ],
            ),
            |injector, mut args| {
                let id = *args.remove(0).downcast::<i32>().unwrap();
                Ok(Request { id, logger: injector.get::<Logger>()? })
            },
        )
        .add::<Handler>()
        .seal()
        .unwrap();

    let injector = Injector::new(component);
    let err = injector.get::<Handler>().unwrap_err();
    assert!(matches!(err, InjectionError::FactoryProductRequested(_)));
}
