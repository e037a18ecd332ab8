use super::*;
use crate::member::{Member, members_shape};
use rgm_types::{Composite, Field, RecGroupShape, ShapeRef, StorageType, TypeDef, ValType};

fn ref_field(target: u32) -> Field<ShapeRef<TypeId>> {
    Field::immutable(StorageType::Val(ValType::nullable(ShapeRef::Local(target))))
}

/// `a1, a2, b1, b2` where `a` types carry an extra `i32` field. The only
/// nontrivial automorphism swaps `a1` with `a2` and `b1` with `b2`.
fn swapped_pairs(store: &mut TypeStore) -> Vec<TypeId> {
    let a = |next: u32, cross: u32| {
        TypeDef::struct_(vec![
            ref_field(next),
            ref_field(cross),
            Field::mutable(StorageType::Val(ValType::I32)),
        ])
    };
    let b = |next: u32, cross: u32| TypeDef::struct_(vec![ref_field(next), ref_field(cross)]);
    store.intern_defs(vec![a(1, 2), a(0, 3), b(3, 0), b(2, 1)])
}

fn canonical_order(types: &[TypeId], permutation: &[usize]) -> Vec<TypeId> {
    let mut canonical = vec![TypeId(u32::MAX); types.len()];
    for (&ty, &position) in types.iter().zip(permutation) {
        canonical[position] = ty;
    }
    canonical
}

fn shape_of(store: &TypeStore, types: &[TypeId]) -> RecGroupShape {
    let members: Vec<Member> = types.iter().copied().map(Member::Type).collect();
    members_shape(store, &members)
}

fn field_count(store: &TypeStore, ty: TypeId) -> usize {
    match &store.def(ty).composite {
        Composite::Struct(fields) => fields.len(),
        other => panic!("Expected struct, got {other:?}"),
    }
}

#[test]
fn test_canonical_permutation_is_a_bijection() {
    let mut store = TypeStore::new();
    let types = swapped_pairs(&mut store);
    let indices = FxHashMap::default();

    let mut permutation = Canonicalizer::new(&store, &indices)
        .canonical_permutation(&types)
        .expect("canonical permutation");
    permutation.sort_unstable();
    assert_eq!(permutation, vec![0, 1, 2, 3]);
}

#[test]
fn test_canonical_shape_is_independent_of_input_order() {
    let mut store = TypeStore::new();
    let types = swapped_pairs(&mut store);
    let indices = FxHashMap::default();
    let canonicalizer = Canonicalizer::new(&store, &indices);

    let shuffled = vec![types[3], types[1], types[0], types[2]];
    let first = canonical_order(
        &types,
        &canonicalizer
            .canonical_permutation(&types)
            .expect("canonical permutation"),
    );
    let second = canonical_order(
        &shuffled,
        &canonicalizer
            .canonical_permutation(&shuffled)
            .expect("canonical permutation"),
    );

    assert_eq!(shape_of(&store, &first), shape_of(&store, &second));
}

#[test]
fn test_canonical_order_stripes_across_classes() {
    let mut store = TypeStore::new();
    let types = swapped_pairs(&mut store);
    let indices = FxHashMap::default();

    let permutation = Canonicalizer::new(&store, &indices)
        .canonical_permutation(&types)
        .expect("canonical permutation");
    let canonical = canonical_order(&types, &permutation);
    let counts: Vec<usize> = canonical.iter().map(|&ty| field_count(&store, ty)).collect();

    // One member of each class before the second member of either.
    assert_eq!(counts[0], counts[2]);
    assert_eq!(counts[1], counts[3]);
    assert_ne!(counts[0], counts[1]);
}

#[test]
fn test_outside_references_ordered_by_global_index() {
    let mut store = TypeStore::new();
    let x = store.intern_defs(vec![TypeDef::struct_(vec![])])[0];
    let y = store.intern_defs(vec![TypeDef::array(Field::mutable(StorageType::I8))])[0];
    let outside = |target: TypeId| {
        Field::immutable(StorageType::Val(ValType::nullable(ShapeRef::Outside(target))))
    };
    // Two members that differ only in which outside type they point at.
    let group = store.intern_defs(vec![
        TypeDef::struct_(vec![ref_field(1), outside(x)]),
        TypeDef::struct_(vec![ref_field(0), outside(y)]),
    ]);

    let mut indices = FxHashMap::default();
    indices.insert(x, 1);
    indices.insert(y, 0);
    let permutation = Canonicalizer::new(&store, &indices)
        .canonical_permutation(&group)
        .expect("canonical permutation");
    // `y` has the smaller index, so the member pointing at it roots the
    // least order.
    assert_eq!(permutation, vec![1, 0]);

    indices.insert(x, 0);
    indices.insert(y, 1);
    let permutation = Canonicalizer::new(&store, &indices)
        .canonical_permutation(&group)
        .expect("canonical permutation");
    assert_eq!(permutation, vec![0, 1]);
}

#[test]
fn test_singleton_is_its_own_canonical_order() {
    let mut store = TypeStore::new();
    let ty = store.intern_defs(vec![TypeDef::struct_(vec![ref_field(0)])])[0];
    let indices = FxHashMap::default();

    assert_eq!(
        Canonicalizer::new(&store, &indices).canonical_permutation(&[ty]),
        Ok(vec![0])
    );
}

#[test]
fn test_repeated_member_is_rejected() {
    let mut store = TypeStore::new();
    let ty = store.intern_defs(vec![TypeDef::struct_(vec![ref_field(0)])])[0];
    let indices = FxHashMap::default();

    assert_eq!(
        Canonicalizer::new(&store, &indices).canonical_permutation(&[ty, ty]),
        Err(MinimizeError::PermutationSizeMismatch {
            members: 2,
            permutation: 1,
        })
    );
}
