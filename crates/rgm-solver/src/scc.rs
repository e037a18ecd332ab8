//! Strongly connected components of the private type graph.
//!
//! Tarjan's algorithm, driven by an explicit frame stack so that deep
//! reference chains cannot overflow the call stack. Components come out in
//! reverse topological order: a component is emitted only after every
//! component it can reach. Rebuilding groups in emission order therefore
//! never needs a reference to a group that does not exist yet.

use crate::graph::reference_graph;
use fixedbitset::FixedBitSet;
use rgm_types::{TypeId, TypeStore};
use smallvec::SmallVec;
use tracing::trace;

struct TarjanState<'g> {
    graph: &'g [SmallVec<[usize; 4]>],
    index: Vec<Option<u32>>,
    lowlink: Vec<u32>,
    on_stack: FixedBitSet,
    stack: Vec<usize>,
    next_index: u32,
    components: Vec<Vec<usize>>,
}

impl<'g> TarjanState<'g> {
    fn new(graph: &'g [SmallVec<[usize; 4]>]) -> Self {
        let n = graph.len();
        TarjanState {
            graph,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: FixedBitSet::with_capacity(n),
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: usize) {
        self.index[node] = Some(self.next_index);
        self.lowlink[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);
    }

    fn strongconnect(&mut self, root: usize) {
        // (node, next child to visit)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.discover(root);

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            if let Some(&child) = self.graph[node].get(next) {
                frame.1 += 1;
                match self.index[child] {
                    None => {
                        self.discover(child);
                        frames.push((child, 0));
                    }
                    Some(child_index) if self.on_stack.contains(child) => {
                        self.lowlink[node] = self.lowlink[node].min(child_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[node]);
            }
            if self.index[node] == Some(self.lowlink[node]) {
                self.emit(node);
            }
        }
    }

    fn emit(&mut self, root: usize) {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack.set(member, false);
            component.push(member);
            if member == root {
                break;
            }
        }
        // Stack order is discovery order reversed.
        component.reverse();
        self.components.push(component);
    }
}

/// Partition `types` into strongly connected components, following only
/// reference edges between members of `types`.
pub fn type_sccs(types: &[TypeId], store: &TypeStore) -> Vec<Vec<TypeId>> {
    let graph = reference_graph(types, store);
    let mut state = TarjanState::new(&graph);
    for root in 0..types.len() {
        if state.index[root].is_none() {
            state.strongconnect(root);
        }
    }

    let components: Vec<Vec<TypeId>> = state
        .components
        .into_iter()
        .map(|component| component.into_iter().map(|i| types[i]).collect())
        .collect();
    trace!(
        types = types.len(),
        components = components.len(),
        "computed strongly connected components"
    );
    components
}

#[cfg(test)]
#[path = "../tests/scc_tests.rs"]
mod tests;
