//! Contract violations detected while minimizing recursion groups.
//!
//! The pass runs over already-validated input, so every variant here is a
//! programmer error upstream of the pass, never a property of the data the
//! user wrote.

use rgm_types::{BuildError, TypeId};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MinimizeError {
    /// A descriptor's described type is not among the types being grouped.
    DescribedTypeOutsideGroup { descriptor: TypeId, described: TypeId },
    /// A group and its permutation disagree on the number of members.
    PermutationSizeMismatch { members: usize, permutation: usize },
    /// The precedence graph of a group has a cycle.
    NoValidOrdering,
    /// A group marked as owning class state has none.
    MissingClassState { group: u32 },
    /// The final construction request was rejected.
    Build(BuildError),
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::DescribedTypeOutsideGroup {
                descriptor,
                described,
            } => write!(
                f,
                "type {} describes type {}, which is outside its group",
                descriptor.0, described.0
            ),
            MinimizeError::PermutationSizeMismatch {
                members,
                permutation,
            } => write!(
                f,
                "group of {members} types has a permutation of {permutation} entries"
            ),
            MinimizeError::NoValidOrdering => {
                write!(f, "supertype and descriptor constraints form a cycle")
            }
            MinimizeError::MissingClassState { group } => {
                write!(f, "group {group} owns an equivalence class but has no class state")
            }
            MinimizeError::Build(err) => write!(f, "failed to build minimized types: {err}"),
        }
    }
}

impl std::error::Error for MinimizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinimizeError::Build(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BuildError> for MinimizeError {
    fn from(err: BuildError) -> Self {
        MinimizeError::Build(err)
    }
}
