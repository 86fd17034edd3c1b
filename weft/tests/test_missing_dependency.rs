use std::sync::Arc;

use weft::{Buildable, Injector, InjectionError, Partial, SealError};

trait Writer: Send + Sync {}

#[derive(Buildable)]
struct HelloGreeter {
    #[allow(dead_code)]
    writer: Arc<dyn Writer>,
}

#[test]
fn an_unbound_injected_dependency_fails_at_seal_time() {
    let result = Partial::new().add::<HelloGreeter>().seal();

    match result {
        Err(SealError::MissingBinding(e)) => {
            assert_eq!(e.dependant.name, std::any::type_name::<HelloGreeter>());
            assert_eq!(e.dependency.name, std::any::type_name::<dyn Writer>());
        }
        Err(other) => panic!("expected MissingBinding, got {other:?}"),
        Ok(_) => panic!("expected MissingBinding, seal succeeded"),
    }
}

#[test]
fn bind_to_an_unregistered_implementation_fails_at_seal_time() {
    struct StdoutWriter;
    impl Writer for StdoutWriter {}

    let result = Partial::new().bind::<dyn Writer, StdoutWriter>().seal();
    assert!(matches!(result, Err(SealError::MissingBinding(_))));
}

#[test]
fn asking_an_injector_for_something_genuinely_unbound_is_a_runtime_error() {
    // Reached only through a dynamically-typed `Injector::get` call for a
    // type the sealed Component never promised — every statically declared
    // dependency is already closure-checked at seal time.
    let component = Partial::new().seal().unwrap();
    let injector = Injector::new(component);
    let err = injector.get::<dyn Writer>().unwrap_err();
    assert!(matches!(err, InjectionError::Unregistered(_)));
}
