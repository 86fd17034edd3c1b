use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use weft::{Injector, Partial};

#[derive(Debug, PartialEq, Eq)]
struct Config {
    name: String,
}

#[test]
fn bind_instance_hands_back_the_same_externally_owned_value() {
    let config = Config { name: "prod".into() };
    let component = Partial::new().bind_instance(config).seal().unwrap();

    let injector = Injector::new(component);
    let a = injector.get::<Config>().unwrap();
    let b = injector.get::<Config>().unwrap();

    assert_eq!(a.name, "prod");
    assert!(Arc::ptr_eq(&a, &b));
}

struct TrackedDrop(Arc<AtomicUsize>);
impl Drop for TrackedDrop {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn a_handle_the_caller_keeps_outlives_the_injectors_teardown() {
    // `bind_instance` takes ownership of whatever's handed to it; to retain
    // an independent handle the caller shares an `Arc` up front, the same
    // way a host would hand a container a shared resource it still owns.
    // Teardown only ever drops the injector's own reference, never reaches
    // into the value itself.
    let drop_count = Arc::new(AtomicUsize::new(0));
    let shared = Arc::new(TrackedDrop(drop_count.clone()));

    let component = Partial::new().bind_instance(shared.clone()).seal().unwrap();
    let injector = Injector::new(component);
    let _ = injector.get::<Arc<TrackedDrop>>().unwrap();

    drop(injector);
    assert_eq!(drop_count.load(Ordering::SeqCst), 0, "the caller's own Arc keeps the value alive");

    drop(shared);
    assert_eq!(drop_count.load(Ordering::SeqCst), 1, "dropping the last handle finally drops the value");
}
