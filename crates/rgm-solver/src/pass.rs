//! The recursion group minimization pass.

use crate::error::MinimizeError;
use crate::minimize::RecGroupMinimizer;
use crate::rewrite::rewrite_types;
use crate::scc::type_sccs;
use crate::stats::MinimizeStats;
use rgm_types::{FxIndexSet, Module, RecGroupId, TypeId, Visibility, collect_heap_type_info};
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MinimizeOutcome {
    /// GC is disabled, so there are no groups to minimize. The module is
    /// untouched.
    Skipped,
    Rewritten {
        /// Replacement of every private type.
        old_to_new: FxHashMap<TypeId, TypeId>,
        stats: MinimizeStats,
    },
}

/// Split the module's private types into minimal recursion groups, keeping
/// every group's shape distinct from every other group's, public ones
/// included, and rewrite the module to use the new types.
pub fn minimize_rec_groups(module: &mut Module) -> Result<MinimizeOutcome, MinimizeError> {
    if !module.features.has_gc() {
        debug!("GC disabled, skipping rec group minimization");
        return Ok(MinimizeOutcome::Skipped);
    }
    let _span = debug_span!("minimize_rec_groups").entered();

    let info = collect_heap_type_info(module);

    let mut type_indices: FxHashMap<TypeId, u32> = FxHashMap::default();
    type_indices.reserve(info.len());
    let mut private: Vec<TypeId> = Vec::with_capacity(info.len());
    let mut public_groups: FxIndexSet<RecGroupId> = FxIndexSet::default();
    for (index, (&ty, entry)) in info.iter().enumerate() {
        type_indices.insert(ty, index as u32);
        match entry.visibility {
            Visibility::Private => private.push(ty),
            Visibility::Public => {
                public_groups.insert(module.store.rec_group(ty));
            }
        }
    }

    let (groups, mut stats) = {
        let mut minimizer = RecGroupMinimizer::new(&module.store, &type_indices);
        for group in public_groups {
            minimizer.insert_public_group(group);
        }
        for scc in type_sccs(&private, &module.store) {
            minimizer.add_scc(scc)?;
        }
        minimizer.finish()
    };
    stats.private_types = private.len();

    let old_to_new = rewrite_types(&groups, module)?;
    debug!(
        private = stats.private_types,
        groups = stats.output_groups,
        branded = stats.branded_groups,
        conflicts = stats.conflicts.total(),
        "minimized rec groups"
    );
    Ok(MinimizeOutcome::Rewritten { old_to_new, stats })
}
