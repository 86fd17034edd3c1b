use weft::{InjectionError, Injector, Partial, Signature, TypeInfo};

trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;
}

struct PluginOne;
impl Plugin for PluginOne {
    fn name(&self) -> &'static str {
        "one"
    }
}

struct PluginTwo;
impl Plugin for PluginTwo {
    fn name(&self) -> &'static str {
        "two"
    }
}

#[test]
fn multibindings_are_returned_in_declaration_order() {
    let component = Partial::new()
        .add_multibinding::<dyn Plugin, PluginOne>(Signature::nullary(TypeInfo::of::<PluginOne>()), |_| Ok(PluginOne))
        .add_multibinding::<dyn Plugin, PluginTwo>(Signature::nullary(TypeInfo::of::<PluginTwo>()), |_| Ok(PluginTwo))
        .seal()
        .unwrap();

    let injector = Injector::new(component);
    let plugins = injector.get_multibindings::<dyn Plugin>().unwrap();
    let names: Vec<_> = plugins.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["one", "two"]);
}

#[test]
fn a_type_with_only_multibindings_has_no_regular_binding() {
    let component = Partial::new()
        .add_multibinding::<dyn Plugin, PluginOne>(Signature::nullary(TypeInfo::of::<PluginOne>()), |_| Ok(PluginOne))
        .seal()
        .unwrap();

    let injector = Injector::new(component);
    let err = injector.get::<dyn Plugin>().unwrap_err();
    assert!(matches!(err, InjectionError::Unregistered(_)));
}

#[test]
fn an_unused_multibinding_type_resolves_to_an_empty_sequence() {
    let component = Partial::new().seal().unwrap();
    let injector = Injector::new(component);
    let plugins = injector.get_multibindings::<dyn Plugin>().unwrap();
    assert!(plugins.is_empty());
}

#[test]
fn repeated_calls_memoize_each_contribution() {
    let component = Partial::new()
        .add_multibinding::<dyn Plugin, PluginOne>(Signature::nullary(TypeInfo::of::<PluginOne>()), |_| Ok(PluginOne))
        .seal()
        .unwrap();

    let injector = Injector::new(component);
    let first = injector.get_multibindings::<dyn Plugin>().unwrap();
    let second = injector.get_multibindings::<dyn Plugin>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first[0], &second[0]));
}
