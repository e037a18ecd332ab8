use super::*;
use rgm_types::{BuildError, FeatureSet, Field, ShapeRef, StorageType, TypeDef, ValType};

fn ref_field(target: u32) -> Field<ShapeRef<TypeId>> {
    Field::immutable(StorageType::Val(ValType::nullable(ShapeRef::Local(target))))
}

#[test]
fn test_reordered_group_gets_new_types_and_keeps_names() {
    let mut module = Module::new(FeatureSet::GC_DEFAULTS);
    let ids = module.store.intern_defs(vec![
        TypeDef::struct_(vec![
            ref_field(1),
            Field::mutable(StorageType::Val(ValType::I32)),
        ]),
        TypeDef::struct_(vec![ref_field(0)]),
    ]);
    let (a, b) = (ids[0], ids[1]);
    module.declare_type(a, "a");
    module.declare_type(b, "b");

    let old_to_new = rewrite_types(&[RecGroupInfo::new(vec![b, a])], &mut module)
        .expect("valid group");

    assert_eq!(old_to_new.len(), 2);
    let (new_a, new_b) = (old_to_new[&a], old_to_new[&b]);
    assert_ne!(new_a, a);
    let group = module.store.rec_group(new_b);
    assert_eq!(
        module.store.rec_group_types(group).collect::<Vec<_>>(),
        vec![new_b, new_a]
    );
    assert_eq!(module.types, vec![new_a, new_b]);
    assert_eq!(module.type_by_name("a"), Some(new_a));
    assert_eq!(module.type_by_name("b"), Some(new_b));
}

#[test]
fn test_descriptor_placed_first_is_a_build_error() {
    let mut module = Module::new(FeatureSet::GC_DEFAULTS);
    let ids = module.store.intern_defs(vec![
        TypeDef::struct_(vec![]).with_descriptor(ShapeRef::Local(1)),
        TypeDef::struct_(vec![]).describing(ShapeRef::Local(0)),
    ]);
    let (described, descriptor) = (ids[0], ids[1]);
    module.declare_type(described, "described");

    let result = rewrite_types(
        &[RecGroupInfo::new(vec![descriptor, described])],
        &mut module,
    );

    assert_eq!(
        result,
        Err(MinimizeError::Build(
            BuildError::DescriptorBeforeDescribed { slot: 0 }
        ))
    );
    assert_eq!(module.types, vec![described]);
}
