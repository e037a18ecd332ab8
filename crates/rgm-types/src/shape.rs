//! Structural fingerprints of recursion groups.
//!
//! A shape is the sequence of a group's definitions with every reference
//! replaced by a [`ShapeRef`]: references to members of the same group become
//! group-local indices, abstract heap types stay as they are, and references
//! to anything else become an outside key `K`.
//!
//! Two groups are the same to an isorecursive validator exactly when their
//! shapes with `K = TypeId` are equal. Canonicalization uses a different `K`
//! (a global ordering key) to get a total order that does not depend on how
//! handles happened to be allocated.

use crate::types::{BasicHeapType, HeapType, TypeDef, TypeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeRef<K> {
    Local(u32),
    Abstract(BasicHeapType),
    Outside(K),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupShape<K> {
    types: Vec<TypeDef<ShapeRef<K>>>,
}

/// Shape compared by type identity; the key of the shape registry and of the
/// type store's canonicalization table.
pub type RecGroupShape = GroupShape<TypeId>;

impl<K> GroupShape<K> {
    pub fn types(&self) -> &[TypeDef<ShapeRef<K>>] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_types(self) -> Vec<TypeDef<ShapeRef<K>>> {
        self.types
    }
}

impl<K> FromIterator<TypeDef<ShapeRef<K>>> for GroupShape<K> {
    fn from_iter<I: IntoIterator<Item = TypeDef<ShapeRef<K>>>>(iter: I) -> Self {
        GroupShape {
            types: iter.into_iter().collect(),
        }
    }
}

/// Map one member definition into shape form.
///
/// `local` returns the group-local index of a defined type that belongs to the
/// group being fingerprinted; every other defined type goes through `outside`.
pub fn shape_def<K>(
    def: &TypeDef<HeapType>,
    local: impl Fn(TypeId) -> Option<u32>,
    outside: impl Fn(TypeId) -> K,
) -> TypeDef<ShapeRef<K>> {
    def.map_refs(&mut |heap| match *heap {
        HeapType::Basic(basic) => ShapeRef::Abstract(basic),
        HeapType::Defined(id) => match local(id) {
            Some(index) => ShapeRef::Local(index),
            None => ShapeRef::Outside(outside(id)),
        },
    })
}
