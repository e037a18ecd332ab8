//! Counters describing one run of the pass.

use serde::Serialize;

/// How many times each conflict-resolution move was taken.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConflictStats {
    /// A classed group collided with a public shape and advanced.
    pub public_advance: u32,
    /// A lone group collided with a public shape and was canonicalized.
    pub public_canonicalize: u32,
    /// A group repeated an earlier shape of its own class.
    pub automorphism: u32,
    /// Two distinct nontrivial classes produced the same shape.
    pub cross_class: u32,
    /// A classed group absorbed a lone group with its shape.
    pub absorb: u32,
    /// A lone group joined the class of a group with its shape.
    pub join: u32,
    /// Two lone groups with the same shape formed a new class.
    pub new_class: u32,
}

impl ConflictStats {
    pub const fn total(&self) -> u32 {
        self.public_advance
            + self.public_canonicalize
            + self.automorphism
            + self.cross_class
            + self.absorb
            + self.join
            + self.new_class
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MinimizeStats {
    pub private_types: usize,
    pub public_groups: usize,
    pub output_groups: usize,
    pub branded_groups: usize,
    pub nontrivial_classes: usize,
    pub conflicts: ConflictStats,
}
