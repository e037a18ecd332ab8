//! Materialize the final groups and rewrite the module to use them.

use crate::error::MinimizeError;
use crate::group::RecGroupInfo;
use crate::member::Member;
use rgm_types::{GlobalTypeRewriter, Module, TypeBuilder, TypeId, TypeRef};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Build every group in order and redirect the module from each old private
/// type to its replacement. Returns the old-to-new mapping; brands have no
/// old type and do not appear in it.
pub fn rewrite_types(
    groups: &[RecGroupInfo],
    module: &mut Module,
) -> Result<FxHashMap<TypeId, TypeId>, MinimizeError> {
    // Builder slot of every old type.
    let mut output_indices: FxHashMap<TypeId, usize> = FxHashMap::default();
    let mut total = 0;
    for group in groups {
        for member in &group.members {
            if let Member::Type(ty) = member {
                output_indices.insert(*ty, total);
            }
            total += 1;
        }
    }

    let mut builder = TypeBuilder::new(total);
    let mut slot = 0;
    for group in groups {
        builder.create_rec_group(slot, group.members.len());
        for member in &group.members {
            let def = match member {
                Member::Type(ty) => module.store.def(*ty).map_refs(&mut |heap| {
                    match heap.defined().and_then(|id| output_indices.get(&id)) {
                        Some(&index) => TypeRef::Temp(index),
                        None => TypeRef::Heap(*heap),
                    }
                }),
                Member::Brand(brand) => brand.def().map_refs(&mut |heap| TypeRef::Heap(*heap)),
            };
            builder.set(slot, def);
            slot += 1;
        }
    }
    let built = builder.build(&mut module.store)?;

    let old_to_new: FxHashMap<TypeId, TypeId> = output_indices
        .iter()
        .map(|(&old, &index)| (old, built[index]))
        .collect();

    let mut rewriter = GlobalTypeRewriter::new(module);
    rewriter.map_types(&old_to_new);
    rewriter.map_type_names_and_indices(&old_to_new);
    debug!(
        groups = groups.len(),
        types = total,
        brands = total - old_to_new.len(),
        "rewrote module types"
    );
    Ok(old_to_new)
}

#[cfg(test)]
#[path = "../tests/rewrite_tests.rs"]
mod tests;
