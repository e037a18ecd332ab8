//! Canonical member order of a strongly connected group.
//!
//! A depth-first walk from any member of a strongly connected group visits
//! every member, so each member roots a complete ordering of the group. Two
//! members whose rooted orderings have the same shape can swap places under
//! an automorphism of the group, and members are partitioned into classes
//! accordingly. Every cycle of an automorphism of a strongly connected group
//! has the same length, so all classes have the same size and no nontrivial
//! automorphism fixes any member. In particular two orders that start with
//! the same member never have the same shape.
//!
//! The canonical order takes the least rooted ordering as reference, sorts
//! each class by position in it, and then stripes across the classes: one
//! member of every class before a second member of any. Since topological
//! orders keep their first element as long as possible, this makes a
//! permutation generator seeded with the canonical order produce as many
//! distinct shapes as possible before it starts repeating.
//!
//! References leaving the group are compared through a global index over all
//! module types, so the result does not depend on how the group's members
//! were ordered on input.

use crate::error::MinimizeError;
use fixedbitset::FixedBitSet;
use rgm_types::{GroupShape, TypeId, TypeStore, shape_def};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::trace;

/// Key ordering references that leave a group. Every type the module uses
/// has an index; anything else sorts after them by handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderKey {
    Indexed(u32),
    Unindexed(TypeId),
}

pub struct Canonicalizer<'a> {
    store: &'a TypeStore,
    type_indices: &'a FxHashMap<TypeId, u32>,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(store: &'a TypeStore, type_indices: &'a FxHashMap<TypeId, u32>) -> Self {
        Canonicalizer {
            store,
            type_indices,
        }
    }

    /// Permutation taking each member of `types` to its position in the
    /// canonical order: `canonical[permutation[i]] == types[i]`. Fails when
    /// the canonical order does not place every member exactly once.
    pub fn canonical_permutation(&self, types: &[TypeId]) -> Result<Vec<usize>, MinimizeError> {
        let positions = crate::graph::position_map(types);

        // Rooted shape -> (first rooted order seen with it, roots).
        let mut classes: BTreeMap<GroupShape<OrderKey>, (Vec<TypeId>, Vec<TypeId>)> =
            BTreeMap::new();
        for &root in types {
            let order = self.rooted_order(root, types, &positions);
            let shape = self.comparable_shape(&order);
            classes
                .entry(shape)
                .or_insert_with(|| (order, Vec::new()))
                .1
                .push(root);
        }

        let mut index_in_least: FxHashMap<TypeId, usize> = FxHashMap::default();
        if let Some((least, _)) = classes.values().next() {
            for (i, &ty) in least.iter().enumerate() {
                index_in_least.insert(ty, i);
            }
        }
        let position_in_least = |ty: &TypeId| index_in_least.get(ty).copied().unwrap_or(usize::MAX);

        let mut class_size = 0;
        for (_, members) in classes.values_mut() {
            members.sort_by_key(position_in_least);
            class_size = class_size.max(members.len());
        }
        debug_assert!(
            classes.values().all(|(_, members)| members.len() == class_size),
            "automorphism classes of a strongly connected group have equal sizes"
        );

        let mut final_order = Vec::with_capacity(types.len());
        for i in 0..class_size {
            for (_, members) in classes.values() {
                if let Some(&member) = members.get(i) {
                    final_order.push(member);
                }
            }
        }

        let index_in_final = crate::graph::position_map(&final_order);
        if final_order.len() != types.len() || index_in_final.len() != types.len() {
            return Err(MinimizeError::PermutationSizeMismatch {
                members: types.len(),
                permutation: index_in_final.len(),
            });
        }
        trace!(
            size = types.len(),
            classes = classes.len(),
            "canonicalized group"
        );
        types
            .iter()
            .map(|ty| {
                index_in_final
                    .get(ty)
                    .copied()
                    .ok_or(MinimizeError::PermutationSizeMismatch {
                        members: types.len(),
                        permutation: index_in_final.len(),
                    })
            })
            .collect()
    }

    /// Members of the group in the order a depth-first walk from `root`
    /// first reaches them. Children are pushed in reference order and the
    /// last pushed is visited first.
    fn rooted_order(
        &self,
        root: TypeId,
        types: &[TypeId],
        positions: &FxHashMap<TypeId, usize>,
    ) -> Vec<TypeId> {
        let mut seen = FixedBitSet::with_capacity(types.len());
        let mut order = Vec::with_capacity(types.len());
        let mut stack = vec![root];
        while let Some(ty) = stack.pop() {
            let Some(&position) = positions.get(&ty) else {
                continue;
            };
            if seen.put(position) {
                continue;
            }
            order.push(ty);
            stack.extend(self.store.referenced_types(ty));
        }
        order
    }

    fn comparable_shape(&self, order: &[TypeId]) -> GroupShape<OrderKey> {
        let local = crate::graph::position_map(order);
        order
            .iter()
            .map(|&ty| {
                shape_def(
                    self.store.def(ty),
                    |id| local.get(&id).map(|&i| i as u32),
                    |id| match self.type_indices.get(&id) {
                        Some(&index) => OrderKey::Indexed(index),
                        None => OrderKey::Unindexed(id),
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/canonical_tests.rs"]
mod tests;
