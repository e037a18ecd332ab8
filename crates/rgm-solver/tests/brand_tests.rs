use super::*;
use rustc_hash::FxHashSet;

fn field(index: usize, mutability: Mutability) -> Field<HeapType> {
    Field {
        storage: FIELD_OPTIONS[index],
        mutability,
    }
}

#[test]
fn test_sequence_starts_with_compact_brands() {
    let brands: Vec<TypeDef<HeapType>> = BrandSequence::default().take(75).collect();

    assert_eq!(brands[0], TypeDef::struct_(vec![]));
    assert_eq!(brands[1], TypeDef::array(Field::mutable(StorageType::I8)));
    assert_eq!(brands[2], TypeDef::array(Field::immutable(StorageType::I8)));
    assert_eq!(brands[3], TypeDef::array(Field::mutable(StorageType::I16)));
    assert_eq!(brands[36], TypeDef::array(field(17, Mutability::Immutable)));
    assert_eq!(brands[37], TypeDef::struct_(vec![Field::mutable(StorageType::I8)]));
    assert_eq!(brands[72], TypeDef::struct_(vec![field(17, Mutability::Immutable)]));
    assert_eq!(
        brands[73],
        TypeDef::struct_(vec![
            Field::mutable(StorageType::I8),
            Field::mutable(StorageType::I8)
        ])
    );
    // Last field moves fastest.
    assert_eq!(
        brands[74],
        TypeDef::struct_(vec![
            Field::mutable(StorageType::I8),
            Field::immutable(StorageType::I8)
        ])
    );
}

#[test]
fn test_sequence_never_repeats() {
    let mut seen = FxHashSet::default();
    for brand in BrandSequence::default().take(2_000) {
        assert!(seen.insert(brand.clone()), "repeated brand {brand:?}");
    }
}

#[test]
fn test_brands_are_final_and_standalone() {
    for brand in BrandSequence::default().take(200) {
        assert!(!brand.open);
        assert_eq!(brand.supertype, None);
        assert!(brand.referenced_types().is_empty());
    }
}

#[test]
fn test_field_options_order() {
    assert_eq!(FIELD_OPTIONS.len(), 18);
    assert_eq!(FIELD_OPTIONS[0], StorageType::I8);
    assert_eq!(FIELD_OPTIONS[2], StorageType::Val(ValType::I32));
    assert_eq!(
        FIELD_OPTIONS[6],
        StorageType::Val(ValType::nullable(HeapType::Basic(BasicHeapType::Any)))
    );
    assert_eq!(
        FIELD_OPTIONS[17],
        StorageType::Val(ValType::non_null(HeapType::Basic(BasicHeapType::NoExt)))
    );
}

#[test]
fn test_field_count_grows() {
    let mut brand = BrandType::default();
    assert_eq!(brand.field_count(), 0);
    brand.advance();
    assert_eq!(brand.field_count(), 1);
    for _ in 0..72 {
        brand.advance();
    }
    assert_eq!(brand.field_count(), 2);
}
