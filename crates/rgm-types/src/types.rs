//! Heap types and their structural definitions.
//!
//! Definitions are generic over the representation `R` of a reference to
//! another heap type:
//!
//! | `R` | Used by |
//! |-----|---------|
//! | `HeapType` | Types stored in the [`TypeStore`](crate::TypeStore) |
//! | `TypeRef` | Slots of a [`TypeBuilder`](crate::TypeBuilder) |
//! | `ShapeRef<K>` | Group shapes, with group-local indices |
//!
//! `map_refs` converts a definition between representations without touching
//! anything but the references.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// =============================================================================
// Handles
// =============================================================================

/// Handle of a defined type in a [`TypeStore`](crate::TypeStore).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Abstract heap types. These have no definition and never join a group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BasicHeapType {
    Any,
    Eq,
    I31,
    Struct,
    Array,
    Func,
    Ext,
    None,
    NoFunc,
    NoExt,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeapType {
    Basic(BasicHeapType),
    Defined(TypeId),
}

impl HeapType {
    pub const fn defined(self) -> Option<TypeId> {
        match self {
            HeapType::Defined(id) => Some(id),
            HeapType::Basic(_) => None,
        }
    }
}

impl From<TypeId> for HeapType {
    fn from(id: TypeId) -> Self {
        HeapType::Defined(id)
    }
}

impl From<BasicHeapType> for HeapType {
    fn from(basic: BasicHeapType) -> Self {
        HeapType::Basic(basic)
    }
}

// =============================================================================
// Definitions
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mutability {
    Immutable,
    Mutable,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RefType<R> {
    pub heap: R,
    pub nullable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValType<R> {
    I32,
    I64,
    F32,
    F64,
    V128,
    Ref(RefType<R>),
}

impl<R> ValType<R> {
    pub const fn nullable(heap: R) -> Self {
        ValType::Ref(RefType {
            heap,
            nullable: true,
        })
    }

    pub const fn non_null(heap: R) -> Self {
        ValType::Ref(RefType {
            heap,
            nullable: false,
        })
    }

    pub fn map_refs<S>(&self, f: &mut impl FnMut(&R) -> S) -> ValType<S> {
        match self {
            ValType::I32 => ValType::I32,
            ValType::I64 => ValType::I64,
            ValType::F32 => ValType::F32,
            ValType::F64 => ValType::F64,
            ValType::V128 => ValType::V128,
            ValType::Ref(r) => ValType::Ref(RefType {
                heap: f(&r.heap),
                nullable: r.nullable,
            }),
        }
    }

    fn for_each_ref(&self, f: &mut impl FnMut(&R)) {
        if let ValType::Ref(r) = self {
            f(&r.heap);
        }
    }
}

/// Field storage: a value type or one of the packed integer types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageType<R> {
    I8,
    I16,
    Val(ValType<R>),
}

impl<R> StorageType<R> {
    pub fn map_refs<S>(&self, f: &mut impl FnMut(&R) -> S) -> StorageType<S> {
        match self {
            StorageType::I8 => StorageType::I8,
            StorageType::I16 => StorageType::I16,
            StorageType::Val(val) => StorageType::Val(val.map_refs(f)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Field<R> {
    pub storage: StorageType<R>,
    pub mutability: Mutability,
}

impl<R> Field<R> {
    pub const fn mutable(storage: StorageType<R>) -> Self {
        Field {
            storage,
            mutability: Mutability::Mutable,
        }
    }

    pub const fn immutable(storage: StorageType<R>) -> Self {
        Field {
            storage,
            mutability: Mutability::Immutable,
        }
    }

    pub fn map_refs<S>(&self, f: &mut impl FnMut(&R) -> S) -> Field<S> {
        Field {
            storage: self.storage.map_refs(f),
            mutability: self.mutability,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signature<R> {
    pub params: Vec<ValType<R>>,
    pub results: Vec<ValType<R>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Struct,
    Array,
    Func,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Composite<R> {
    Struct(Vec<Field<R>>),
    Array(Field<R>),
    Func(Signature<R>),
}

impl<R> Composite<R> {
    pub const fn kind(&self) -> CompositeKind {
        match self {
            Composite::Struct(_) => CompositeKind::Struct,
            Composite::Array(_) => CompositeKind::Array,
            Composite::Func(_) => CompositeKind::Func,
        }
    }

    pub fn map_refs<S>(&self, f: &mut impl FnMut(&R) -> S) -> Composite<S> {
        match self {
            Composite::Struct(fields) => {
                Composite::Struct(fields.iter().map(|field| field.map_refs(f)).collect())
            }
            Composite::Array(element) => Composite::Array(element.map_refs(f)),
            Composite::Func(sig) => Composite::Func(Signature {
                params: sig.params.iter().map(|p| p.map_refs(f)).collect(),
                results: sig.results.iter().map(|r| r.map_refs(f)).collect(),
            }),
        }
    }

    fn for_each_ref(&self, f: &mut impl FnMut(&R)) {
        match self {
            Composite::Struct(fields) => {
                for field in fields {
                    if let StorageType::Val(val) = &field.storage {
                        val.for_each_ref(f);
                    }
                }
            }
            Composite::Array(element) => {
                if let StorageType::Val(val) = &element.storage {
                    val.for_each_ref(f);
                }
            }
            Composite::Func(sig) => {
                for val in sig.params.iter().chain(&sig.results) {
                    val.for_each_ref(f);
                }
            }
        }
    }
}

/// A complete heap type definition.
///
/// `descriptor` and `describes` are the two directions of the descriptor
/// relation; a type that describes another must live in the same recursion
/// group and come after the type it describes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeDef<R> {
    pub composite: Composite<R>,
    pub supertype: Option<R>,
    /// Non-final types may be subtyped.
    pub open: bool,
    pub descriptor: Option<R>,
    pub describes: Option<R>,
}

impl<R> TypeDef<R> {
    pub fn new(composite: Composite<R>) -> Self {
        TypeDef {
            composite,
            supertype: None,
            open: false,
            descriptor: None,
            describes: None,
        }
    }

    pub fn struct_(fields: Vec<Field<R>>) -> Self {
        Self::new(Composite::Struct(fields))
    }

    pub fn array(element: Field<R>) -> Self {
        Self::new(Composite::Array(element))
    }

    pub fn func(params: Vec<ValType<R>>, results: Vec<ValType<R>>) -> Self {
        Self::new(Composite::Func(Signature { params, results }))
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: R) -> Self {
        self.supertype = Some(supertype);
        self
    }

    #[must_use]
    pub fn with_open(mut self) -> Self {
        self.open = true;
        self
    }

    #[must_use]
    pub fn with_descriptor(mut self, descriptor: R) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    #[must_use]
    pub fn describing(mut self, described: R) -> Self {
        self.describes = Some(described);
        self
    }

    pub const fn kind(&self) -> CompositeKind {
        self.composite.kind()
    }

    pub fn map_refs<S>(&self, f: &mut impl FnMut(&R) -> S) -> TypeDef<S> {
        TypeDef {
            composite: self.composite.map_refs(f),
            supertype: self.supertype.as_ref().map(&mut *f),
            open: self.open,
            descriptor: self.descriptor.as_ref().map(&mut *f),
            describes: self.describes.as_ref().map(&mut *f),
        }
    }

    /// Visit every reference in canonical order: composite children first,
    /// then the supertype, the descriptor and the described type.
    pub fn for_each_ref(&self, mut f: impl FnMut(&R)) {
        self.composite.for_each_ref(&mut f);
        for r in [&self.supertype, &self.descriptor, &self.describes]
            .into_iter()
            .flatten()
        {
            f(r);
        }
    }
}

impl TypeDef<HeapType> {
    /// Defined types referenced by this definition, in canonical order.
    /// Duplicates are kept; callers that need a set deduplicate themselves.
    pub fn referenced_types(&self) -> SmallVec<[TypeId; 4]> {
        let mut out = SmallVec::new();
        self.for_each_ref(|heap| {
            if let Some(id) = heap.defined() {
                out.push(id);
            }
        });
        out
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
