//! Precedence and reference graphs over a list of types.

use crate::error::MinimizeError;
use rgm_types::{TypeId, TypeStore};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Adjacency list over positions in `types`, with an edge from each supertype
/// to its subtypes and from each described type to its descriptor. Any valid
/// emission order must be a topological order of this graph.
///
/// Supertypes outside `types` impose no constraint. Described types must be
/// present, since a descriptor always shares a group with what it describes.
pub fn create_type_order_graph(
    types: &[TypeId],
    store: &TypeStore,
) -> Result<Vec<Vec<usize>>, MinimizeError> {
    let indices = position_map(types);
    let mut graph = vec![Vec::new(); types.len()];

    for (i, &ty) in types.iter().enumerate() {
        let def = store.def(ty);
        if let Some(supertype) = def.supertype.and_then(|heap| heap.defined())
            && let Some(&sup) = indices.get(&supertype)
        {
            graph[sup].push(i);
        }
        if let Some(described) = def.describes.and_then(|heap| heap.defined()) {
            let &desc = indices
                .get(&described)
                .ok_or(MinimizeError::DescribedTypeOutsideGroup {
                    descriptor: ty,
                    described,
                })?;
            graph[desc].push(i);
        }
    }
    Ok(graph)
}

/// Reference edges between `types`, by position, in referenced-type order.
/// References to anything outside `types` are dropped.
pub fn reference_graph(types: &[TypeId], store: &TypeStore) -> Vec<SmallVec<[usize; 4]>> {
    let indices = position_map(types);
    types
        .iter()
        .map(|&ty| {
            store
                .referenced_types(ty)
                .into_iter()
                .filter_map(|child| indices.get(&child).copied())
                .collect()
        })
        .collect()
}

pub(crate) fn position_map(types: &[TypeId]) -> FxHashMap<TypeId, usize> {
    let mut indices = FxHashMap::default();
    indices.reserve(types.len());
    for (i, &ty) in types.iter().enumerate() {
        indices.insert(ty, i);
    }
    indices
}

#[cfg(test)]
#[path = "../tests/graph_tests.rs"]
mod tests;
