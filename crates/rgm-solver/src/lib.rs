//! Recursion group minimization.
//!
//! Splits private types into the smallest possible recursion groups (the
//! strongly connected components of the type graph) while keeping every
//! group's shape distinct, so that no two distinct types are merged by
//! isorecursive canonicalization:
//! - Precedence graphs and strongly connected components (`graph`, `scc`)
//! - Lazy topological order enumeration (`topo`)
//! - Canonical member orders of isomorphic groups (`canonical`)
//! - Brand types for groups no permutation can separate (`brand`)
//! - Union-find over isomorphic groups (`classes`, `group`)
//! - The shape registry and conflict resolver (`minimize`)
//! - Materialization of the result (`rewrite`) and the pass itself (`pass`)

pub mod error;
pub use error::MinimizeError;

// Graphs over a list of types
pub mod graph;
pub use graph::{create_type_order_graph, reference_graph};

pub mod scc;
pub use scc::type_sccs;

pub mod topo;
pub use topo::{TopologicalOrders, least_topological_order};

pub mod canonical;
pub use canonical::{Canonicalizer, OrderKey};

pub mod brand;
pub use brand::{BrandSequence, BrandType, FIELD_OPTIONS};

pub mod classes;
pub use classes::{EquivalenceClasses, GroupId};

pub mod member;
pub use member::{Member, members_shape};

pub mod group;
pub use group::{GroupClass, RecGroupInfo};

pub mod stats;
pub use stats::{ConflictStats, MinimizeStats};

pub mod minimize;
pub use minimize::RecGroupMinimizer;

pub mod rewrite;
pub use rewrite::rewrite_types;

pub mod pass;
pub use pass::{MinimizeOutcome, minimize_rec_groups};
