use std::sync::Arc;

use weft::{Buildable, Partial, SealError};

trait Shape: Send + Sync {}

#[derive(Buildable)]
struct Circle;
impl Shape for Circle {}

#[derive(Buildable)]
struct Square;
impl Shape for Square {}

#[test]
fn two_distinct_types_bound_to_the_same_interface_is_a_duplicate() {
    let result = Partial::new()
        .add::<Circle>()
        .bind::<dyn Shape, Circle>()
        .add::<Square>()
        .bind::<dyn Shape, Square>()
        .seal();

    match result {
        Err(SealError::DuplicateBinding(e)) => {
            assert_eq!(e.target.name, std::any::type_name::<dyn Shape>());
        }
        other => panic!("expected DuplicateBinding, got {other:?}"),
    }
}

#[test]
fn adding_the_same_concrete_type_twice_is_a_duplicate() {
    let result = Partial::new().add::<Circle>().add::<Circle>().seal();
    assert!(matches!(result, Err(SealError::DuplicateBinding(_))));
}

#[test]
fn installing_the_same_partial_twice_through_a_diamond_is_not_a_duplicate() {
    let shared = Partial::new().add::<Circle>().bind::<dyn Shape, Circle>();

    let left = Partial::new().install(shared.clone());
    let right = Partial::new().install(shared.clone());

    let top = Partial::new().install(left).install(right);
    let component = top.seal();
    assert!(component.is_ok(), "diamond install of the same Partial must not duplicate-error");
}
