//! Equivalence classes of isomorphic groups.
//!
//! Union-find over output groups, backed by `ena`. A class is trivial until a
//! second group is found to share its shape; from then on exactly one group
//! in the class holds the class state (permutation generator and brand). The
//! unification value records which group that is, because the root picked by
//! the table is unrelated to where the state lives.

use ena::unify::{InPlaceUnificationTable, NoError, UnifyKey, UnifyValue};

/// Index of an output group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl GroupId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Group holding the class state, if the class is nontrivial.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassOwner(pub Option<GroupId>);

impl UnifyKey for GroupId {
    type Value = ClassOwner;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        GroupId(u)
    }

    fn tag() -> &'static str {
        "GroupId"
    }
}

impl UnifyValue for ClassOwner {
    type Error = NoError;

    fn unify_values(a: &Self, b: &Self) -> Result<Self, Self::Error> {
        // Two nontrivial classes are never merged, so at most one side owns
        // state; keep it.
        Ok(ClassOwner(a.0.or(b.0)))
    }
}

pub struct EquivalenceClasses {
    table: InPlaceUnificationTable<GroupId>,
}

impl EquivalenceClasses {
    pub fn new() -> Self {
        EquivalenceClasses {
            table: InPlaceUnificationTable::new(),
        }
    }

    /// Start a new singleton class. Ids are handed out densely from zero.
    pub fn add_set(&mut self) -> GroupId {
        self.table.new_key(ClassOwner(None))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn find(&mut self, group: GroupId) -> GroupId {
        self.table.find(group)
    }

    /// Merge two classes and return the root of the result.
    pub fn union(&mut self, a: GroupId, b: GroupId) -> GroupId {
        self.table.union(a, b);
        self.table.find(a)
    }

    pub fn same_class(&mut self, a: GroupId, b: GroupId) -> bool {
        self.table.unioned(a, b)
    }

    /// Group holding the state of `group`'s class, if it is nontrivial.
    pub fn owner(&mut self, group: GroupId) -> Option<GroupId> {
        self.table.probe_value(group).0
    }

    /// Record that `owner` holds the state of `group`'s class.
    pub fn set_owner(&mut self, group: GroupId, owner: GroupId) {
        self.table.union_value(group, ClassOwner(Some(owner)));
    }
}

#[cfg(test)]
#[path = "../tests/classes_tests.rs"]
mod tests;
