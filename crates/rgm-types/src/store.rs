//! Hash-consing arena of defined types.
//!
//! Types are allocated one recursion group at a time and never change once
//! created. Allocation is interned by group shape: asking for a group whose
//! shape already exists returns the existing types, so two groups with equal
//! shapes are the same types. This is the isorecursive identity rule that the
//! recursion group passes must respect.

use crate::shape::{GroupShape, RecGroupShape, ShapeRef, shape_def};
use crate::types::{HeapType, TypeDef, TypeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::ops::Range;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecGroupId(pub u32);

impl RecGroupId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct TypeEntry {
    def: TypeDef<HeapType>,
    group: RecGroupId,
}

#[derive(Clone, Debug, Default)]
pub struct TypeStore {
    types: Vec<TypeEntry>,
    /// Members of each group are allocated contiguously.
    groups: Vec<Range<u32>>,
    canonical: FxHashMap<RecGroupShape, RecGroupId>,
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.types.len()
    }

    /// Definition of a type. Handles are only minted by this store, so an
    /// out-of-range handle is a caller bug and panics.
    pub fn def(&self, id: TypeId) -> &TypeDef<HeapType> {
        &self.types[id.index()].def
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDef<HeapType>> {
        self.types.get(id.index()).map(|entry| &entry.def)
    }

    pub fn rec_group(&self, id: TypeId) -> RecGroupId {
        self.types[id.index()].group
    }

    pub fn rec_group_types(&self, group: RecGroupId) -> impl ExactSizeIterator<Item = TypeId> {
        self.groups[group.index()].clone().map(TypeId)
    }

    pub fn rec_group_len(&self, group: RecGroupId) -> usize {
        self.groups[group.index()].len()
    }

    /// Position of a type inside its recursion group.
    pub fn index_in_group(&self, id: TypeId) -> u32 {
        let group = self.rec_group(id);
        id.0 - self.groups[group.index()].start
    }

    pub fn referenced_types(&self, id: TypeId) -> SmallVec<[TypeId; 4]> {
        self.def(id).referenced_types()
    }

    /// Shape of a recursion group as stored, outside references by identity.
    pub fn group_shape(&self, group: RecGroupId) -> RecGroupShape {
        let range = self.groups[group.index()].clone();
        let local = |id: TypeId| range.contains(&id.0).then(|| id.0 - range.start);
        range
            .clone()
            .map(|raw| shape_def(self.def(TypeId(raw)), local, |id| id))
            .collect()
    }

    /// Allocate a recursion group from its shape, or return the existing group
    /// with the same shape.
    ///
    /// Every `Outside` reference must already be allocated in this store.
    pub fn intern_group(&mut self, shape: RecGroupShape) -> Vec<TypeId> {
        if let Some(&existing) = self.canonical.get(&shape) {
            trace!(group = existing.0, "reusing canonical rec group");
            return self.rec_group_types(existing).collect();
        }

        let base = self.types.len() as u32;
        let group = RecGroupId(self.groups.len() as u32);
        for def in shape.types() {
            let def = def.map_refs(&mut |r| match *r {
                ShapeRef::Local(index) => HeapType::Defined(TypeId(base + index)),
                ShapeRef::Abstract(basic) => HeapType::Basic(basic),
                ShapeRef::Outside(id) => HeapType::Defined(id),
            });
            self.types.push(TypeEntry { def, group });
        }
        let end = self.types.len() as u32;
        self.groups.push(base..end);
        self.canonical.insert(shape, group);
        trace!(group = group.0, size = end - base, "allocated rec group");
        (base..end).map(TypeId).collect()
    }

    /// Intern a group given as shape-form definitions.
    pub fn intern_defs(&mut self, defs: Vec<TypeDef<ShapeRef<TypeId>>>) -> Vec<TypeId> {
        self.intern_group(defs.into_iter().collect::<GroupShape<TypeId>>())
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
