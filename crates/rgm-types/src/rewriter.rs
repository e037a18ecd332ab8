//! Module-wide reference rewriting.
//!
//! Given a mapping from old types to their replacements, patch every place in
//! the module that names a type. Types missing from the mapping are left
//! alone.

use crate::module::{Module, TypeNames};
use crate::types::{HeapType, TypeId, ValType};
use rustc_hash::FxHashMap;
use tracing::debug;

pub struct GlobalTypeRewriter<'a> {
    module: &'a mut Module,
}

impl<'a> GlobalTypeRewriter<'a> {
    pub fn new(module: &'a mut Module) -> Self {
        Self { module }
    }

    /// Patch function signatures and global types.
    pub fn map_types(&mut self, old_to_new: &FxHashMap<TypeId, TypeId>) {
        let mut patched = 0usize;
        for func in &mut self.module.functions {
            if let Some(&new) = old_to_new.get(&func.sig) {
                patched += usize::from(new != func.sig);
                func.sig = new;
            }
        }
        for global in &mut self.module.globals {
            if let ValType::Ref(r) = &mut global.ty
                && let HeapType::Defined(old) = r.heap
                && let Some(&new) = old_to_new.get(&old)
            {
                patched += usize::from(new != old);
                r.heap = HeapType::Defined(new);
            }
        }
        debug!(patched, "mapped module type references");
    }

    /// Move type and field names to the new types and patch the type index
    /// table.
    pub fn map_type_names_and_indices(&mut self, old_to_new: &FxHashMap<TypeId, TypeId>) {
        for id in &mut self.module.types {
            if let Some(&new) = old_to_new.get(id) {
                *id = new;
            }
        }

        // Take every renamed entry out before inserting any, since a new type
        // may also be an old key.
        let moved: Vec<(TypeId, TypeNames)> = old_to_new
            .iter()
            .filter_map(|(old, new)| {
                self.module
                    .type_names
                    .remove(old)
                    .map(|names| (*new, names))
            })
            .collect();
        for (new, names) in moved {
            self.module.type_names.insert(new, names);
        }
    }
}

#[cfg(test)]
#[path = "../tests/rewriter_tests.rs"]
mod tests;
