//! Members of an output group under construction.

use crate::brand::BrandType;
use rgm_types::{RecGroupShape, TypeId, TypeStore, shape_def};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    /// A private input type.
    Type(TypeId),
    /// A synthetic brand with no input counterpart.
    Brand(BrandType),
}

impl Member {
    pub const fn as_type(&self) -> Option<TypeId> {
        match self {
            Member::Type(ty) => Some(*ty),
            Member::Brand(_) => None,
        }
    }
}

/// Shape the group would have if it were built with exactly these members
/// in this order. References to input types outside the group are compared
/// by identity.
pub fn members_shape(store: &TypeStore, members: &[Member]) -> RecGroupShape {
    let mut local: FxHashMap<TypeId, u32> = FxHashMap::default();
    for (i, member) in members.iter().enumerate() {
        if let Member::Type(ty) = member {
            local.insert(*ty, i as u32);
        }
    }

    members
        .iter()
        .map(|member| match member {
            Member::Type(ty) => shape_def(store.def(*ty), |id| local.get(&id).copied(), |id| id),
            // Brands only refer to abstract heap types.
            Member::Brand(brand) => shape_def(&brand.def(), |_| None, |id| id),
        })
        .collect()
}
