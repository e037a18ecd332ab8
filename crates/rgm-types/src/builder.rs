//! Type construction requests.
//!
//! A `TypeBuilder` holds one definition per slot. Slots are partitioned into
//! recursion groups with `create_rec_group`; slots not covered by an explicit
//! group become singleton groups. A definition refers to other slots with
//! `TypeRef::Temp` and to already existing types with `TypeRef::Heap`.
//!
//! Groups are built in slot order and each group may only refer to itself and
//! to earlier groups.

use crate::shape::{RecGroupShape, ShapeRef};
use crate::store::TypeStore;
use crate::types::{BasicHeapType, HeapType, TypeDef, TypeId};
use std::fmt;
use std::ops::Range;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Another slot of the same builder.
    Temp(usize),
    Heap(HeapType),
}

impl From<HeapType> for TypeRef {
    fn from(heap: HeapType) -> Self {
        TypeRef::Heap(heap)
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::Heap(HeapType::Defined(id))
    }
}

impl From<BasicHeapType> for TypeRef {
    fn from(basic: BasicHeapType) -> Self {
        TypeRef::Heap(HeapType::Basic(basic))
    }
}

/// Why a construction request could not be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    UndefinedSlot { slot: usize },
    InvalidRecGroup { start: usize, len: usize },
    ForwardReference { slot: usize, target: usize },
    UnknownType { slot: usize, ty: TypeId },
    AbstractSupertype { slot: usize },
    SupertypeAfterSubtype { slot: usize, supertype: usize },
    FinalSupertype { slot: usize },
    SupertypeKindMismatch { slot: usize },
    DescriptorOutsideGroup { slot: usize },
    MismatchedDescriptor { slot: usize },
    DescriptorBeforeDescribed { slot: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UndefinedSlot { slot } => write!(f, "slot {slot} has no definition"),
            BuildError::InvalidRecGroup { start, len } => {
                write!(f, "invalid rec group at {start} with {len} types")
            }
            BuildError::ForwardReference { slot, target } => {
                write!(f, "slot {slot} refers to slot {target} in a later rec group")
            }
            BuildError::UnknownType { slot, ty } => {
                write!(f, "slot {slot} refers to unknown type {}", ty.0)
            }
            BuildError::AbstractSupertype { slot } => {
                write!(f, "slot {slot} declares an abstract supertype")
            }
            BuildError::SupertypeAfterSubtype { slot, supertype } => {
                write!(f, "slot {slot} has supertype {supertype} declared after it")
            }
            BuildError::FinalSupertype { slot } => {
                write!(f, "slot {slot} declares a final supertype")
            }
            BuildError::SupertypeKindMismatch { slot } => {
                write!(f, "slot {slot} has a supertype of a different kind")
            }
            BuildError::DescriptorOutsideGroup { slot } => {
                write!(f, "slot {slot} has a descriptor relation leaving its rec group")
            }
            BuildError::MismatchedDescriptor { slot } => {
                write!(f, "slot {slot} has a one-sided descriptor relation")
            }
            BuildError::DescriptorBeforeDescribed { slot } => {
                write!(f, "slot {slot} describes a type declared after it")
            }
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Clone, Debug, Default)]
pub struct TypeBuilder {
    slots: Vec<Option<TypeDef<TypeRef>>>,
    groups: Vec<Range<usize>>,
}

impl TypeBuilder {
    pub fn new(size: usize) -> Self {
        TypeBuilder {
            slots: vec![None; size],
            groups: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn set(&mut self, slot: usize, def: TypeDef<TypeRef>) {
        self.slots[slot] = Some(def);
    }

    pub fn create_rec_group(&mut self, start: usize, len: usize) {
        self.groups.push(start..start + len);
    }

    /// Build every group into `store`, returning one type per slot.
    pub fn build(self, store: &mut TypeStore) -> Result<Vec<TypeId>, BuildError> {
        let groups = self.partition()?;
        let mut built: Vec<TypeId> = Vec::with_capacity(self.slots.len());

        for range in groups {
            let mut defs = Vec::with_capacity(range.len());
            for slot in range.clone() {
                let def = self.slots[slot]
                    .as_ref()
                    .ok_or(BuildError::UndefinedSlot { slot })?;
                let mut error = None;
                let shaped = def.map_refs(&mut |r| match *r {
                    TypeRef::Temp(target) if range.contains(&target) => {
                        ShapeRef::Local((target - range.start) as u32)
                    }
                    TypeRef::Temp(target) if target < range.start => {
                        ShapeRef::Outside(built[target])
                    }
                    TypeRef::Temp(target) => {
                        error.get_or_insert(BuildError::ForwardReference { slot, target });
                        ShapeRef::Local(0)
                    }
                    TypeRef::Heap(HeapType::Basic(basic)) => ShapeRef::Abstract(basic),
                    TypeRef::Heap(HeapType::Defined(ty)) => {
                        if !store.contains(ty) {
                            error.get_or_insert(BuildError::UnknownType { slot, ty });
                        }
                        ShapeRef::Outside(ty)
                    }
                });
                if let Some(error) = error {
                    return Err(error);
                }
                defs.push(shaped);
            }

            validate_group(&defs, range.start, store)?;
            let shape: RecGroupShape = defs.into_iter().collect();
            built.extend(store.intern_group(shape));
        }

        debug!(types = built.len(), "built type construction request");
        Ok(built)
    }

    fn partition(&self) -> Result<Vec<Range<usize>>, BuildError> {
        let mut explicit = self.groups.clone();
        explicit.sort_by_key(|range| range.start);

        let mut out = Vec::new();
        let mut next = 0;
        for range in explicit {
            if range.start < next || range.end > self.slots.len() || range.is_empty() {
                return Err(BuildError::InvalidRecGroup {
                    start: range.start,
                    len: range.len(),
                });
            }
            out.extend((next..range.start).map(|slot| slot..slot + 1));
            next = range.end;
            out.push(range);
        }
        out.extend((next..self.slots.len()).map(|slot| slot..slot + 1));
        Ok(out)
    }
}

fn validate_group(
    defs: &[TypeDef<ShapeRef<TypeId>>],
    start: usize,
    store: &TypeStore,
) -> Result<(), BuildError> {
    for (i, def) in defs.iter().enumerate() {
        let slot = start + i;

        if let Some(supertype) = def.supertype {
            let (kind, open) = match supertype {
                ShapeRef::Abstract(_) => return Err(BuildError::AbstractSupertype { slot }),
                ShapeRef::Local(j) => {
                    let j = j as usize;
                    if j >= i {
                        return Err(BuildError::SupertypeAfterSubtype {
                            slot,
                            supertype: start + j,
                        });
                    }
                    (defs[j].kind(), defs[j].open)
                }
                ShapeRef::Outside(id) => {
                    let sup = store.def(id);
                    (sup.kind(), sup.open)
                }
            };
            if !open {
                return Err(BuildError::FinalSupertype { slot });
            }
            if kind != def.kind() {
                return Err(BuildError::SupertypeKindMismatch { slot });
            }
        }

        let this = ShapeRef::Local(i as u32);
        if let Some(descriptor) = def.descriptor {
            let ShapeRef::Local(j) = descriptor else {
                return Err(BuildError::DescriptorOutsideGroup { slot });
            };
            if defs[j as usize].describes != Some(this) {
                return Err(BuildError::MismatchedDescriptor { slot });
            }
        }
        if let Some(described) = def.describes {
            let ShapeRef::Local(j) = described else {
                return Err(BuildError::DescriptorOutsideGroup { slot });
            };
            if j as usize >= i {
                return Err(BuildError::DescriptorBeforeDescribed { slot });
            }
            if defs[j as usize].descriptor != Some(this) {
                return Err(BuildError::MismatchedDescriptor { slot });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
