use std::sync::Arc;

use weft::{Buildable, Injector, Partial};

trait Writer: Send + Sync {
    fn write(&self, msg: &str) -> String;
}

#[derive(Buildable)]
struct StdoutWriter;

impl Writer for StdoutWriter {
    fn write(&self, msg: &str) -> String {
        format!("stdout: {msg}")
    }
}

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Buildable)]
struct HelloGreeter {
    writer: Arc<dyn Writer>,
}

impl Greeter for HelloGreeter {
    fn greet(&self) -> String {
        self.writer.write("hello")
    }
}

fn build_component() -> weft::Component {
    Partial::new()
        .add::<StdoutWriter>()
        .bind::<dyn Writer, StdoutWriter>()
        .add::<HelloGreeter>()
        .bind::<dyn Greeter, HelloGreeter>()
        .seal()
        .unwrap()
}

#[test]
fn resolves_a_chain_of_dependencies() {
    let injector = Injector::new(build_component());
    let greeter = injector.get::<dyn Greeter>().unwrap();
    assert_eq!(greeter.greet(), "stdout: hello");
}

#[test]
fn same_injector_memoizes_singletons() {
    let injector = Injector::new(build_component());
    let a = injector.get::<dyn Greeter>().unwrap();
    let b = injector.get::<dyn Greeter>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let writer_via_a = injector.get::<dyn Writer>().unwrap();
    let writer_via_b = injector.get::<dyn Writer>().unwrap();
    assert!(Arc::ptr_eq(&writer_via_a, &writer_via_b));
}

#[test]
fn two_injectors_over_the_same_component_build_independent_instances() {
    let component = build_component();
    let first = Injector::new(component.clone());
    let second = Injector::new(component);

    let a = first.get::<dyn Greeter>().unwrap();
    let b = second.get::<dyn Greeter>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn bind_to_is_transparent_to_the_caller() {
    // Retrieving through the interface and through the concrete type (when
    // also bound) must observe the same underlying instance.
    let component = Partial::new().add::<StdoutWriter>().bind::<dyn Writer, StdoutWriter>().seal().unwrap();
    let injector = Injector::new(component);
    let iface = injector.get::<dyn Writer>().unwrap();
    assert_eq!(iface.write("x"), "stdout: x");
}
