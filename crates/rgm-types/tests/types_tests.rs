use super::*;

fn ref_field(id: u32) -> Field<HeapType> {
    Field::mutable(StorageType::Val(ValType::nullable(HeapType::Defined(TypeId(id)))))
}

#[test]
fn test_referenced_types_canonical_order() {
    let def = TypeDef::struct_(vec![ref_field(3), ref_field(1)])
        .with_supertype(HeapType::Defined(TypeId(7)))
        .with_descriptor(HeapType::Defined(TypeId(9)));

    let refs = def.referenced_types();
    assert_eq!(refs.as_slice(), &[TypeId(3), TypeId(1), TypeId(7), TypeId(9)]);
}

#[test]
fn test_referenced_types_skips_abstract() {
    let def: TypeDef<HeapType> = TypeDef::func(
        vec![ValType::I32, ValType::nullable(HeapType::Basic(BasicHeapType::Any))],
        vec![ValType::non_null(HeapType::Defined(TypeId(2)))],
    );
    assert_eq!(def.referenced_types().as_slice(), &[TypeId(2)]);
}

#[test]
fn test_map_refs_preserves_structure() {
    let def = TypeDef::array(ref_field(4)).with_open();
    let mapped = def.map_refs(&mut |heap| match heap {
        HeapType::Defined(id) => id.0 * 10,
        HeapType::Basic(_) => 0,
    });

    assert!(mapped.open);
    assert_eq!(mapped.kind(), CompositeKind::Array);
    match mapped.composite {
        Composite::Array(field) => {
            assert_eq!(field.mutability, Mutability::Mutable);
            assert_eq!(field.storage, StorageType::Val(ValType::nullable(40)));
        }
        other => panic!("Expected array, got {other:?}"),
    }
}

#[test]
fn test_definition_deserializes_from_json() {
    let json = r#"{
        "composite": { "Struct": [
            { "storage": "I8", "mutability": "Mutable" },
            { "storage": { "Val": { "Ref": { "heap": { "Basic": "Func" }, "nullable": false } } },
              "mutability": "Immutable" }
        ] },
        "supertype": null,
        "open": true,
        "descriptor": null,
        "describes": null
    }"#;

    let def: TypeDef<HeapType> = serde_json::from_str(json).expect("valid definition");
    let expected = TypeDef::struct_(vec![
        Field::mutable(StorageType::I8),
        Field::immutable(StorageType::Val(ValType::non_null(HeapType::Basic(
            BasicHeapType::Func,
        )))),
    ])
    .with_open();
    assert_eq!(def, expected);
}
