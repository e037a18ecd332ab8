//! Module model.
//!
//! Only the parts of a module that refer to heap types are modelled: the type
//! index table, type and field names, function signatures and global types.
//! Imports and exports are flags on the functions and globals that cross the
//! module boundary; they decide which types are public.

use crate::features::FeatureSet;
use crate::store::TypeStore;
use crate::types::{HeapType, TypeId, ValType};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeNames {
    pub name: String,
    pub field_names: FxHashMap<u32, String>,
}

impl TypeNames {
    pub fn new(name: impl Into<String>) -> Self {
        TypeNames {
            name: name.into(),
            field_names: FxHashMap::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    /// Signature type; always a function type.
    pub sig: TypeId,
    pub imported: bool,
    pub exported: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, sig: TypeId) -> Self {
        Function {
            name: name.into(),
            sig,
            imported: false,
            exported: false,
        }
    }

    pub const fn is_public(&self) -> bool {
        self.imported || self.exported
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Global {
    pub name: String,
    pub ty: ValType<HeapType>,
    pub mutable: bool,
    pub imported: bool,
    pub exported: bool,
}

impl Global {
    pub fn new(name: impl Into<String>, ty: ValType<HeapType>) -> Self {
        Global {
            name: name.into(),
            ty,
            mutable: false,
            imported: false,
            exported: false,
        }
    }

    pub const fn is_public(&self) -> bool {
        self.imported || self.exported
    }
}

#[derive(Clone, Debug, Default)]
pub struct Module {
    pub features: FeatureSet,
    pub store: TypeStore,
    /// Type index table, in declaration order.
    pub types: Vec<TypeId>,
    pub type_names: FxHashMap<TypeId, TypeNames>,
    pub functions: Vec<Function>,
    pub globals: Vec<Global>,
}

impl Module {
    pub fn new(features: FeatureSet) -> Self {
        Module {
            features,
            ..Self::default()
        }
    }

    /// Declare a type in the index table under a name.
    pub fn declare_type(&mut self, id: TypeId, name: impl Into<String>) {
        self.types.push(id);
        self.type_names.insert(id, TypeNames::new(name));
    }

    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .copied()
            .find(|id| self.type_names.get(id).is_some_and(|names| names.name == name))
    }
}
