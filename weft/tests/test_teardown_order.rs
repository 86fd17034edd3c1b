use std::sync::{Arc, Mutex};

use weft::{Buildable, Injector, InjectionError, ParamInfo, Partial, Signature, TypeInfo};

struct Log(Mutex<Vec<&'static str>>);

struct C {
    log: Arc<Log>,
}
struct B {
    log: Arc<Log>,
    #[allow(dead_code)]
    c: Arc<C>,
}
struct A {
    log: Arc<Log>,
    #[allow(dead_code)]
    b: Arc<B>,
}

fn shared_log(injector: &Injector) -> Result<Arc<Log>, InjectionError> {
    // The log is bound as an `Arc<Log>` `Instance`, so the test keeps its
    // own handle alive independently of the injector;
    // resolving it back out through the container hands back a second
    // layer of `Arc` that this just unwraps one level of.
    Ok((*injector.get::<Arc<Log>>()?).clone())
}

impl Buildable for C {
    fn signature() -> Signature {
        Signature::new(TypeInfo::of::<C>(), vec![ParamInfo::injected(TypeInfo::of::<Arc<Log>>())])
    }

    fn construct(injector: &Injector) -> Result<Self, InjectionError> {
        let log = shared_log(injector)?;
        log.0.lock().unwrap().push("+C");
        Ok(Self { log })
    }
}

impl Drop for C {
    fn drop(&mut self) {
        self.log.0.lock().unwrap().push("-C");
    }
}

impl Buildable for B {
    fn signature() -> Signature {
        Signature::new(
            TypeInfo::of::<B>(),
            vec![ParamInfo::injected(TypeInfo::of::<Arc<Log>>()), ParamInfo::injected(TypeInfo::of::<C>())],
        )
    }

    fn construct(injector: &Injector) -> Result<Self, InjectionError> {
        let log = shared_log(injector)?;
        let c = injector.get::<C>()?;
        log.0.lock().unwrap().push("+B");
        Ok(Self { log, c })
    }
}

impl Drop for B {
    fn drop(&mut self) {
        self.log.0.lock().unwrap().push("-B");
    }
}

impl Buildable for A {
    fn signature() -> Signature {
        Signature::new(
            TypeInfo::of::<A>(),
            vec![ParamInfo::injected(TypeInfo::of::<Arc<Log>>()), ParamInfo::injected(TypeInfo::of::<B>())],
        )
    }

    fn construct(injector: &Injector) -> Result<Self, InjectionError> {
        let log = shared_log(injector)?;
        let b = injector.get::<B>()?;
        log.0.lock().unwrap().push("+A");
        Ok(Self { log, b })
    }
}

impl Drop for A {
    fn drop(&mut self) {
        self.log.0.lock().unwrap().push("-A");
    }
}

#[test]
fn teardown_reverses_first_construction_order() {
    let log = Arc::new(Log(Mutex::new(Vec::new())));

    let component = Partial::new()
        .bind_instance(log.clone())
        .add::<C>()
        .add::<B>()
        .add::<A>()
        .seal()
        .unwrap();

    let injector = Injector::new(component);
    let _ = injector.get::<A>().unwrap();

    assert_eq!(*log.0.lock().unwrap(), vec!["+C", "+B", "+A"]);

    drop(injector);

    // A holds its own Arc<B>, B its own Arc<C> — dropping the injector's
    // single strong reference to each cascades through the ownership chain
    // in exactly the order the injector tore its own references down in.
    assert_eq!(*log.0.lock().unwrap(), vec!["+C", "+B", "+A", "-A", "-B", "-C"]);
}
