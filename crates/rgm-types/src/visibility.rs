//! Visibility of the heap types used by a module.
//!
//! A type is public when the outside world can observe it: it is reachable
//! from an imported or exported function signature or global. Public-ness is
//! closed over referenced types and over recursion group siblings, because a
//! public group can never be split or reordered. Everything else the module
//! uses is private.
//!
//! Types are reported in discovery order, which only depends on the module's
//! own ordering, so rewriting a module in place keeps the order stable.

use crate::module::Module;
use crate::types::{HeapType, TypeId, ValType};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use tracing::debug;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeapTypeInfo {
    /// Number of references to the type from the module and from other types.
    pub use_count: usize,
    pub visibility: Visibility,
}

struct Collector<'a> {
    module: &'a Module,
    info: FxIndexMap<TypeId, HeapTypeInfo>,
    public_roots: Vec<TypeId>,
}

impl Collector<'_> {
    fn note_root(&mut self, root: TypeId, public: bool) {
        if public {
            self.public_roots.push(root);
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(entry) = self.info.get_mut(&id) {
                entry.use_count += 1;
                continue;
            }
            self.info.insert(
                id,
                HeapTypeInfo {
                    use_count: 1,
                    visibility: Visibility::Private,
                },
            );
            // Reverse so children are discovered in declaration order.
            let children = self.module.store.referenced_types(id);
            stack.extend(children.into_iter().rev());
        }
    }

    fn note_val(&mut self, ty: &ValType<HeapType>, public: bool) {
        if let ValType::Ref(r) = ty
            && let Some(id) = r.heap.defined()
        {
            self.note_root(id, public);
        }
    }

    fn propagate_public(&mut self) {
        let module = self.module;
        let store = &module.store;
        let mut stack = std::mem::take(&mut self.public_roots);
        while let Some(id) = stack.pop() {
            let entry = self.info.entry(id).or_insert(HeapTypeInfo {
                use_count: 0,
                visibility: Visibility::Private,
            });
            if entry.visibility == Visibility::Public {
                continue;
            }
            entry.visibility = Visibility::Public;
            stack.extend(store.referenced_types(id));
            stack.extend(store.rec_group_types(store.rec_group(id)));
        }
    }
}

/// Collect every heap type the module uses, with its visibility.
pub fn collect_heap_type_info(module: &Module) -> FxIndexMap<TypeId, HeapTypeInfo> {
    let mut collector = Collector {
        module,
        info: FxIndexMap::default(),
        public_roots: Vec::new(),
    };

    for &id in &module.types {
        collector.note_root(id, false);
    }
    for func in &module.functions {
        collector.note_root(func.sig, func.is_public());
    }
    for global in &module.globals {
        collector.note_val(&global.ty, global.is_public());
    }
    collector.propagate_public();

    let info = collector.info;
    debug!(
        types = info.len(),
        public = info
            .values()
            .filter(|entry| entry.visibility == Visibility::Public)
            .count(),
        "collected heap type info"
    );
    info
}

#[cfg(test)]
#[path = "../tests/visibility_tests.rs"]
mod tests;
