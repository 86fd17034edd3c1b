use weft::{Buildable, Injector, Partial};

#[derive(Buildable)]
struct Alpha;

#[derive(Buildable)]
struct Beta;

#[derive(Buildable)]
struct Gamma;

fn a() -> Partial {
    Partial::new().add::<Alpha>()
}
fn b() -> Partial {
    Partial::new().add::<Beta>()
}
fn c() -> Partial {
    Partial::new().add::<Gamma>()
}

#[test]
fn install_is_associative() {
    // a.install(b).install(c) seals to the same observable binding set as
    // a.install(b.install(c)).
    let left_assoc = a().install(b()).install(c()).seal().unwrap();
    let right_assoc = a().install(b().install(c())).seal().unwrap();

    let left_injector = Injector::new(left_assoc);
    let right_injector = Injector::new(right_assoc);

    assert!(left_injector.get::<Alpha>().is_ok());
    assert!(left_injector.get::<Beta>().is_ok());
    assert!(left_injector.get::<Gamma>().is_ok());

    assert!(right_injector.get::<Alpha>().is_ok());
    assert!(right_injector.get::<Beta>().is_ok());
    assert!(right_injector.get::<Gamma>().is_ok());
}
