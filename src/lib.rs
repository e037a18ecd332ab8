//! Recursion group minimization for isorecursive type sections.
//!
//! Under isorecursive typing two types are the same exactly when their
//! recursion groups have the same shape and they sit at the same index.
//! Large groups are expensive to validate and hide which types are
//! actually related, so this crate splits a module's private types into
//! the smallest groups possible (the strongly connected components of the
//! type graph) without ever making two distinct types equal:
//!
//! - `rgm_types`: type store, module model, visibility and rewriting
//! - `rgm_solver`: the minimizer and the `minimize_rec_groups` pass
//!
//! ```ignore
//! let outcome = rgm::minimize_rec_groups(&mut module)?;
//! ```

pub use rgm_solver::{
    ConflictStats, MinimizeError, MinimizeOutcome, MinimizeStats, RecGroupMinimizer,
    minimize_rec_groups,
};
pub use rgm_types::{
    FeatureSet, Function, Global, HeapType, Module, RecGroupId, TypeDef, TypeId, TypeStore,
};

pub use rgm_solver as solver;
pub use rgm_types as types;

// Log output configuration (RGM_LOG / RGM_LOG_FORMAT)
pub mod tracing_config;
