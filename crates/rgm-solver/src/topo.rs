//! Topological orders of a precedence graph.
//!
//! `TopologicalOrders` enumerates every topological order of a small DAG
//! lazily, one `advance` at a time. Orders that share a longer prefix are
//! produced consecutively, so the first element stays fixed for as long as
//! possible before it changes. Canonicalization relies on that property: all
//! orders starting with the same element have distinct shapes, so the
//! generator yields as many distinct shapes as it can before repeating.
//!
//! The enumeration keeps one buffer holding the current order followed by
//! the vertices still available at each depth, and a stack of selectors
//! describing which available vertex was chosen at each depth.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Copy, Clone, Debug)]
struct Selector {
    /// Position in the buffer this selector fills.
    start: usize,
    /// Number of vertices available to choose from, starting at `start`.
    count: usize,
    /// Which of the available vertices is currently chosen.
    index: usize,
}

#[derive(Clone, Debug)]
pub struct TopologicalOrders {
    graph: Vec<Vec<usize>>,
    indegrees: Vec<usize>,
    buf: Vec<usize>,
    selectors: Vec<Selector>,
    exhausted: bool,
}

impl TopologicalOrders {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        let mut orders = TopologicalOrders {
            graph: Vec::new(),
            indegrees: Vec::new(),
            buf: Vec::new(),
            selectors: Vec::new(),
            exhausted: false,
        };
        orders.reset(graph);
        orders
    }

    /// Restart the enumeration over a new graph.
    pub fn reset(&mut self, graph: &[Vec<usize>]) {
        let n = graph.len();
        self.graph = graph.to_vec();
        self.indegrees = vec![0; n];
        self.buf = vec![0; n];
        self.selectors.clear();
        self.exhausted = false;

        for children in &self.graph {
            for &child in children {
                self.indegrees[child] += 1;
            }
        }
        let mut available = 0;
        for vertex in 0..n {
            if self.indegrees[vertex] == 0 {
                self.buf[available] = vertex;
                available += 1;
            }
        }

        if n == 0 {
            return;
        }
        self.selectors.push(Selector {
            start: 0,
            count: available,
            index: 0,
        });
        if !self.fill() {
            self.exhausted = true;
        }
    }

    /// The current order, or `None` once every order has been produced. A
    /// cyclic graph has no orders at all.
    pub fn current(&self) -> Option<&[usize]> {
        (!self.exhausted).then_some(self.buf.as_slice())
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Move to the next order. Returns `false` when there is none.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        loop {
            let Some(selector) = self.selectors.pop() else {
                self.exhausted = true;
                return false;
            };
            if let Some(next) = self.reselect(selector) {
                self.selectors.push(next);
                break;
            }
        }
        let filled = self.fill();
        debug_assert!(filled, "an acyclic graph cannot get stuck mid-order");
        filled
    }

    /// Apply selections from the top selector down to the last position.
    fn fill(&mut self) -> bool {
        loop {
            let Some(&top) = self.selectors.last() else {
                return false;
            };
            let Some(next) = self.select(top) else {
                return false;
            };
            if self.selectors.len() == self.graph.len() {
                return true;
            }
            self.selectors.push(next);
        }
    }

    /// Commit to the vertex chosen by `selector`, making its children
    /// available to the following position.
    fn select(&mut self, selector: Selector) -> Option<Selector> {
        if selector.count == 0 {
            return None;
        }
        let selection = self.buf[selector.start];
        let mut next = Selector {
            start: selector.start + 1,
            count: selector.count - 1,
            index: 0,
        };
        for &child in &self.graph[selection] {
            self.indegrees[child] -= 1;
            if self.indegrees[child] == 0 {
                self.buf[next.start + next.count] = child;
                next.count += 1;
            }
        }
        Some(next)
    }

    /// Undo the choice made by `selector` and move it to its next choice.
    /// Returns `None`, with the available vertices restored to their original
    /// arrangement, once every choice has been tried.
    fn reselect(&mut self, mut selector: Selector) -> Option<Selector> {
        let unselected = self.buf[selector.start];
        for &child in &self.graph[unselected] {
            self.indegrees[child] += 1;
        }
        if selector.index + 1 == selector.count {
            self.buf[selector.start..selector.start + selector.count].rotate_left(1);
            return None;
        }
        selector.index += 1;
        self.buf.swap(selector.start, selector.start + selector.index);
        Some(selector)
    }
}

/// The lexicographically least topological order: at each step, the
/// smallest available vertex. An order that is already valid is returned
/// unchanged. `None` for a cyclic graph.
pub fn least_topological_order(graph: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut indegrees = vec![0usize; graph.len()];
    for children in graph {
        for &child in children {
            indegrees[child] += 1;
        }
    }
    let mut available: BinaryHeap<Reverse<usize>> = indegrees
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(vertex, _)| Reverse(vertex))
        .collect();

    let mut order = Vec::with_capacity(graph.len());
    while let Some(Reverse(vertex)) = available.pop() {
        order.push(vertex);
        for &child in &graph[vertex] {
            indegrees[child] -= 1;
            if indegrees[child] == 0 {
                available.push(Reverse(child));
            }
        }
    }
    (order.len() == graph.len()).then_some(order)
}

#[cfg(test)]
#[path = "../tests/topo_tests.rs"]
mod tests;
