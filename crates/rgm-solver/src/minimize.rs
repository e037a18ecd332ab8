//! Shape registry and conflict resolution.
//!
//! Every output group must end up with a shape no other group has, public
//! groups included. Groups are inserted one strongly connected component at
//! a time; each insertion may displace other groups, so the groups whose
//! shapes need checking are kept on a worklist and processed until it drains.
//!
//! Groups that turn out to be isomorphic are collected lazily into
//! equivalence classes. A class only pays for canonicalization once it holds
//! two groups (or one group that collides with a public shape). From then on
//! its permutation generator hands out a fresh order, and eventually a fresh
//! brand, for every further member. The brand sequence is infinite, so every
//! conflict is eventually resolved.

use crate::canonical::Canonicalizer;
use crate::classes::{EquivalenceClasses, GroupId};
use crate::error::MinimizeError;
use crate::graph::create_type_order_graph;
use crate::group::{GroupClass, RecGroupInfo};
use crate::stats::MinimizeStats;
use crate::topo::least_topological_order;
use rgm_types::{RecGroupId, RecGroupShape, TypeId, TypeStore};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Who holds a shape in the registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ShapeOwner {
    /// A public group, which can never change.
    Public,
    Group(GroupId),
}

/// How a class moves on after a conflict.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    NextPermutation,
    NextBrand,
}

pub struct RecGroupMinimizer<'a> {
    store: &'a TypeStore,
    /// Global index of every type the module uses, public or private.
    type_indices: &'a FxHashMap<TypeId, u32>,
    groups: Vec<RecGroupInfo>,
    shapes: FxHashMap<RecGroupShape, ShapeOwner>,
    classes: EquivalenceClasses,
    worklist: Vec<GroupId>,
    stats: MinimizeStats,
}

impl<'a> RecGroupMinimizer<'a> {
    pub fn new(store: &'a TypeStore, type_indices: &'a FxHashMap<TypeId, u32>) -> Self {
        RecGroupMinimizer {
            store,
            type_indices,
            groups: Vec::new(),
            shapes: FxHashMap::default(),
            classes: EquivalenceClasses::new(),
            worklist: Vec::new(),
            stats: MinimizeStats::default(),
        }
    }

    /// Reserve the shape of a group that must not change.
    pub fn insert_public_group(&mut self, group: RecGroupId) {
        let shape = self.store.group_shape(group);
        let previous = self.shapes.insert(shape, ShapeOwner::Public);
        debug_assert!(previous.is_none(), "distinct groups have distinct shapes");
        self.stats.public_groups += 1;
    }

    /// Add one strongly connected component as a new output group and
    /// resolve every conflict it causes.
    pub fn add_scc(&mut self, mut scc: Vec<TypeId>) -> Result<GroupId, MinimizeError> {
        let id = self.classes.add_set();
        debug_assert_eq!(id.index(), self.groups.len());

        // Start from allocation order, which is the emitted order of a group
        // that was already minimized, then fix up precedence.
        scc.sort_unstable();
        let graph = create_type_order_graph(&scc, self.store)?;
        let order = least_topological_order(&graph).ok_or(MinimizeError::NoValidOrdering)?;
        let members = order.iter().map(|&i| scc[i]).collect();
        self.groups.push(RecGroupInfo::new(members));
        trace!(group = id.0, size = scc.len(), "added group");

        debug_assert!(self.worklist.is_empty());
        self.worklist.push(id);
        self.update_shapes()?;
        Ok(id)
    }

    pub fn groups(&self) -> &[RecGroupInfo] {
        &self.groups
    }

    pub fn stats(&self) -> &MinimizeStats {
        &self.stats
    }

    pub fn finish(self) -> (Vec<RecGroupInfo>, MinimizeStats) {
        let mut stats = self.stats;
        stats.output_groups = self.groups.len();
        stats.branded_groups = self.groups.iter().filter(|group| group.has_brand).count();
        (self.groups, stats)
    }

    fn update_shapes(&mut self) -> Result<(), MinimizeError> {
        while let Some(group) = self.worklist.pop() {
            self.update_shape(group)?;
        }
        Ok(())
    }

    fn update_shape(&mut self, group: GroupId) -> Result<(), MinimizeError> {
        let shape = self.groups[group.index()].shape(self.store);
        let Some(&holder) = self.shapes.get(&shape) else {
            self.shapes.insert(shape, ShapeOwner::Group(group));
            return Ok(());
        };

        let other = match holder {
            ShapeOwner::Public => return self.resolve_public_conflict(group),
            ShapeOwner::Group(other) => other,
        };

        // A repeat of an earlier shape of the same class: an automorphism was
        // hit, and the remaining permutations would only repeat more shapes.
        if self.classes.same_class(group, other) {
            let owner = self.owner_of(group)?;
            self.stats.conflicts.automorphism += 1;
            debug!(group = group.0, other = other.0, "repeated class shape, advancing brand");
            return self.step_class(owner, group, Step::NextBrand);
        }

        match (self.classes.owner(group), self.classes.owner(other)) {
            // Two distinct classes only meet when a brand of one coincides
            // with the base shape of the other. Keep them apart.
            (Some(owner), Some(_)) => {
                self.stats.conflicts.cross_class += 1;
                debug!(group = group.0, other = other.0, "collided with another class");
                self.step_class(owner, group, Step::NextPermutation)
            }
            // `other` has this group's shape, so it shares its permutation.
            (Some(owner), None) => {
                self.stats.conflicts.absorb += 1;
                debug!(group = group.0, other = other.0, "absorbing group into class");
                self.classes.union(group, other);
                let permutation = self.groups[group.index()].permutation.clone();
                self.groups[other.index()].permutation = permutation;
                self.step_class(owner, group, Step::NextPermutation)
            }
            // Undoing `other`'s permutation leads this group to the canonical
            // order too.
            (None, Some(owner)) => {
                self.stats.conflicts.join += 1;
                debug!(group = group.0, other = other.0, "joining existing class");
                self.classes.union(other, group);
                let permutation = self.groups[other.index()].permutation.clone();
                self.groups[group.index()].permutation = permutation;
                self.step_class(owner, group, Step::NextPermutation)
            }
            (None, None) => {
                self.stats.conflicts.new_class += 1;
                debug!(group = group.0, other = other.0, "forming new class");
                self.form_class(group, other, &shape)
            }
        }
    }

    fn resolve_public_conflict(&mut self, group: GroupId) -> Result<(), MinimizeError> {
        if let Some(owner) = self.classes.owner(group) {
            self.stats.conflicts.public_advance += 1;
            debug!(group = group.0, "collided with public group, advancing");
            return self.step_class(owner, group, Step::NextPermutation);
        }

        // Canonicalize the lone group so it has a permutation generator.
        self.stats.conflicts.public_canonicalize += 1;
        self.stats.nontrivial_classes += 1;
        debug!(group = group.0, "collided with public group, canonicalizing");
        let canonicalizer = Canonicalizer::new(self.store, self.type_indices);
        let info = &mut self.groups[group.index()];
        debug_assert!(!info.has_brand);
        let types: Vec<TypeId> = info.input_types().collect();
        info.permutation = canonicalizer.canonical_permutation(&types)?;
        let class = GroupClass::new(info, self.store)?;
        class.permute(info)?;
        info.class = Some(class);
        self.classes.set_owner(group, group);
        self.worklist.push(group);
        Ok(())
    }

    /// Put two lone groups with the same shape into a new class owned by
    /// `other`. Both are re-verified, `other` first: it either takes the
    /// shape back or is displaced, and `group` then joins it.
    fn form_class(
        &mut self,
        group: GroupId,
        other: GroupId,
        shape: &RecGroupShape,
    ) -> Result<(), MinimizeError> {
        self.shapes.remove(shape);
        self.stats.nontrivial_classes += 1;

        let types: Vec<TypeId> = self.groups[group.index()].input_types().collect();
        let permutation =
            Canonicalizer::new(self.store, self.type_indices).canonical_permutation(&types)?;
        self.groups[group.index()].permutation = permutation.clone();
        self.groups[other.index()].permutation = permutation;

        let class = GroupClass::new(&self.groups[other.index()], self.store)?;
        class.permute(&mut self.groups[other.index()])?;
        class.permute(&mut self.groups[group.index()])?;
        self.groups[other.index()].class = Some(class);
        self.classes.set_owner(other, other);

        self.worklist.push(group);
        self.worklist.push(other);
        Ok(())
    }

    /// Advance the class held by `owner` and re-permute `group` with it.
    fn step_class(
        &mut self,
        owner: GroupId,
        group: GroupId,
        step: Step,
    ) -> Result<(), MinimizeError> {
        let mut class = self.groups[owner.index()]
            .class
            .take()
            .ok_or(MinimizeError::MissingClassState { group: owner.0 })?;
        match step {
            Step::NextPermutation => class.advance(self.store),
            Step::NextBrand => class.advance_brand(self.store),
        }
        let permuted = class.permute(&mut self.groups[group.index()]);
        self.groups[owner.index()].class = Some(class);
        permuted?;
        self.worklist.push(group);
        Ok(())
    }

    fn owner_of(&mut self, group: GroupId) -> Result<GroupId, MinimizeError> {
        self.classes
            .owner(group)
            .ok_or(MinimizeError::MissingClassState { group: group.0 })
    }
}

#[cfg(test)]
#[path = "../tests/minimize_tests.rs"]
mod tests;
