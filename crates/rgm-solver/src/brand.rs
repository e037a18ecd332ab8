//! Brand types.
//!
//! When every permutation of an equivalence class with a distinct shape is
//! used up, groups are told apart by mixing in an extra member that nothing
//! references: a brand. `BrandType` walks an infinite sequence of candidate
//! brands, most compactly encoded first:
//!
//! 1. the empty struct,
//! 2. arrays of each field option, mutable before immutable,
//! 3. structs with one field, in the same order,
//! 4. structs with two fields, odometer order with the last field fastest,
//!
//! and so on with one more field each time.

use rgm_types::{BasicHeapType, Field, HeapType, Mutability, StorageType, TypeDef, ValType};
use smallvec::SmallVec;

const fn nullable(basic: BasicHeapType) -> StorageType<HeapType> {
    StorageType::Val(ValType::nullable(HeapType::Basic(basic)))
}

const fn non_null(basic: BasicHeapType) -> StorageType<HeapType> {
    StorageType::Val(ValType::non_null(HeapType::Basic(basic)))
}

/// Field storage options, ordered by encoded size.
pub const FIELD_OPTIONS: [StorageType<HeapType>; 18] = [
    StorageType::I8,
    StorageType::I16,
    StorageType::Val(ValType::I32),
    StorageType::Val(ValType::I64),
    StorageType::Val(ValType::F32),
    StorageType::Val(ValType::F64),
    nullable(BasicHeapType::Any),
    nullable(BasicHeapType::Func),
    nullable(BasicHeapType::Ext),
    nullable(BasicHeapType::None),
    nullable(BasicHeapType::NoFunc),
    nullable(BasicHeapType::NoExt),
    non_null(BasicHeapType::Any),
    non_null(BasicHeapType::Func),
    non_null(BasicHeapType::Ext),
    non_null(BasicHeapType::None),
    non_null(BasicHeapType::NoFunc),
    non_null(BasicHeapType::NoExt),
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
struct FieldChoice {
    index: u8,
    immutable: bool,
}

impl FieldChoice {
    fn field(self) -> Field<HeapType> {
        Field {
            storage: FIELD_OPTIONS[self.index as usize],
            mutability: if self.immutable {
                Mutability::Immutable
            } else {
                Mutability::Mutable
            },
        }
    }

    /// Step to the next choice. Returns `false` when wrapping around to the
    /// first one.
    fn advance(&mut self) -> bool {
        if !self.immutable {
            self.immutable = true;
            return true;
        }
        self.immutable = false;
        self.index = (self.index + 1) % FIELD_OPTIONS.len() as u8;
        self.index != 0
    }
}

/// Position in the brand sequence. The default is the first brand, the
/// empty struct.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BrandType {
    use_array: bool,
    fields: SmallVec<[FieldChoice; 2]>,
}

impl BrandType {
    /// Definition of the current brand: final, without supertype.
    pub fn def(&self) -> TypeDef<HeapType> {
        match self.fields.first() {
            Some(element) if self.use_array => TypeDef::array(element.field()),
            _ => TypeDef::struct_(self.fields.iter().map(|choice| choice.field()).collect()),
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn advance(&mut self) {
        for choice in self.fields.iter_mut().rev() {
            if choice.advance() {
                return;
            }
        }
        if self.use_array {
            self.use_array = false;
            return;
        }
        self.fields.push(FieldChoice::default());
        self.use_array = self.fields.len() == 1;
    }
}

/// The brand sequence as an iterator of definitions.
#[derive(Clone, Debug, Default)]
pub struct BrandSequence {
    next: BrandType,
}

impl Iterator for BrandSequence {
    type Item = TypeDef<HeapType>;

    fn next(&mut self) -> Option<Self::Item> {
        let def = self.next.def();
        self.next.advance();
        Some(def)
    }
}

#[cfg(test)]
#[path = "../tests/brand_tests.rs"]
mod tests;
