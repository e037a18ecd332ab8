use super::*;
use rgm_types::{Field, ShapeRef, StorageType, TypeDef, ValType};

fn ref_field(target: ShapeRef<TypeId>) -> Field<ShapeRef<TypeId>> {
    Field::mutable(StorageType::Val(ValType::nullable(target)))
}

#[test]
fn test_components_follow_dependencies() {
    let mut store = TypeStore::new();
    let cycle = store.intern_defs(vec![
        TypeDef::struct_(vec![ref_field(ShapeRef::Local(1))]),
        TypeDef::struct_(vec![ref_field(ShapeRef::Local(0))]),
    ]);
    let (a, b) = (cycle[0], cycle[1]);
    let c = store.intern_defs(vec![TypeDef::struct_(vec![ref_field(ShapeRef::Outside(a))])])[0];

    let sccs = type_sccs(&[c, a, b], &store);

    assert_eq!(sccs, vec![vec![a, b], vec![c]]);
}

#[test]
fn test_edges_leaving_the_set_are_ignored() {
    let mut store = TypeStore::new();
    let cycle = store.intern_defs(vec![
        TypeDef::struct_(vec![ref_field(ShapeRef::Local(1))]),
        TypeDef::struct_(vec![ref_field(ShapeRef::Local(0))]),
    ]);

    // Only one half of the cycle is private; it is a component on its own.
    let sccs = type_sccs(&[cycle[0]], &store);
    assert_eq!(sccs, vec![vec![cycle[0]]]);
}

#[test]
fn test_unrelated_types_come_out_in_input_order() {
    let mut store = TypeStore::new();
    let x = store.intern_defs(vec![TypeDef::struct_(vec![])])[0];
    let y = store.intern_defs(vec![TypeDef::array(Field::mutable(StorageType::I8))])[0];
    let z = store.intern_defs(vec![TypeDef::struct_(vec![ref_field(ShapeRef::Local(0))])])[0];

    let sccs = type_sccs(&[y, z, x], &store);
    assert_eq!(sccs, vec![vec![y], vec![z], vec![x]]);
}

#[test]
fn test_long_chain_does_not_recurse() {
    let mut store = TypeStore::new();
    let mut chain = vec![store.intern_defs(vec![TypeDef::struct_(vec![])])[0]];
    for _ in 0..10_000 {
        let prev = *chain.last().expect("non-empty");
        let def = TypeDef::struct_(vec![ref_field(ShapeRef::Outside(prev))]);
        chain.push(store.intern_defs(vec![def])[0]);
    }
    chain.reverse();

    let sccs = type_sccs(&chain, &store);
    assert_eq!(sccs.len(), chain.len());
    // The deepest dependency comes out first.
    assert_eq!(sccs[0], vec![*chain.last().expect("non-empty")]);
}
