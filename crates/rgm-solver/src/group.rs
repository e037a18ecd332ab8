//! Output groups and the disambiguation state of nontrivial classes.

use crate::brand::BrandType;
use crate::error::MinimizeError;
use crate::graph::create_type_order_graph;
use crate::member::{Member, members_shape};
use crate::topo::TopologicalOrders;
use rgm_types::{RecGroupShape, TypeId, TypeStore};
use tracing::trace;

/// One output recursion group.
#[derive(Clone, Debug, Default)]
pub struct RecGroupInfo {
    /// Members in emission order.
    pub members: Vec<Member>,
    /// Position of each member in the canonical order of its class:
    /// `canonical[permutation[i]] == members[i]`. Only meaningful once the
    /// group belongs to a nontrivial class.
    pub permutation: Vec<usize>,
    pub has_brand: bool,
    /// Set on the one group that holds its class's state.
    pub class: Option<GroupClass>,
}

impl RecGroupInfo {
    pub fn new(members: Vec<TypeId>) -> Self {
        RecGroupInfo {
            members: members.into_iter().map(Member::Type).collect(),
            ..Self::default()
        }
    }

    pub fn shape(&self, store: &TypeStore) -> RecGroupShape {
        members_shape(store, &self.members)
    }

    pub fn input_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.members.iter().filter_map(Member::as_type)
    }
}

/// Disambiguation state shared by every group of a nontrivial class.
///
/// The precedence graph is over canonical positions, shifted by one once a
/// brand occupies canonical position zero.
#[derive(Clone, Debug)]
pub struct GroupClass {
    /// Shape of the lone member of a singleton class. A brand with this shape
    /// would make a branded group indistinguishable from its own base type.
    singleton_shape: Option<RecGroupShape>,
    brand: Option<BrandType>,
    order_graph: Vec<Vec<usize>>,
    orders: TopologicalOrders,
}

impl GroupClass {
    /// Class state seeded from `info`, whose permutation must already lead to
    /// the canonical order.
    pub fn new(info: &RecGroupInfo, store: &TypeStore) -> Result<Self, MinimizeError> {
        let canonical = unpermute_types(info)?;
        let order_graph = create_type_order_graph(&canonical, store)?;
        let singleton_shape = match canonical.as_slice() {
            &[only] => Some(members_shape(store, &[Member::Type(only)])),
            _ => None,
        };
        let orders = TopologicalOrders::new(&order_graph);
        if orders.is_exhausted() {
            return Err(MinimizeError::NoValidOrdering);
        }
        Ok(GroupClass {
            singleton_shape,
            brand: None,
            order_graph,
            orders,
        })
    }

    pub fn brand(&self) -> Option<&BrandType> {
        self.brand.as_ref()
    }

    /// Move to the next permutation, or to the next brand once the
    /// permutations run out.
    pub fn advance(&mut self, store: &TypeStore) {
        if !self.orders.advance() {
            self.advance_brand(store);
        }
    }

    /// Move to the next brand and restart the permutations.
    pub fn advance_brand(&mut self, store: &TypeStore) {
        match &mut self.brand {
            Some(brand) => brand.advance(),
            None => {
                self.brand = Some(BrandType::default());
                // The brand takes canonical position zero.
                self.order_graph.insert(0, Vec::new());
                for edges in self.order_graph.iter_mut().skip(1) {
                    for edge in edges.iter_mut() {
                        *edge += 1;
                    }
                }
            }
        }
        if let (Some(brand), Some(singleton)) = (&mut self.brand, &self.singleton_shape)
            && members_shape(store, &[Member::Brand(brand.clone())]) == *singleton
        {
            brand.advance();
        }
        trace!(brand = ?self.brand.as_ref().map(BrandType::def), "advanced brand");
        self.orders.reset(&self.order_graph);
    }

    /// Rearrange `info` into the class's current permutation, adding or
    /// updating its brand member as needed.
    pub fn permute(&self, info: &mut RecGroupInfo) -> Result<(), MinimizeError> {
        let mismatch = MinimizeError::PermutationSizeMismatch {
            members: info.members.len(),
            permutation: info.permutation.len(),
        };
        if info.members.len() != info.permutation.len() {
            return Err(mismatch);
        }
        let inserting_brand = info.members.len() < self.order_graph.len();
        let offset = usize::from(inserting_brand);

        let mut canonical: Vec<Option<Member>> = vec![None; info.members.len() + offset];
        for (member, &position) in info.members.drain(..).zip(&info.permutation) {
            let slot = canonical
                .get_mut(position + offset)
                .ok_or_else(|| mismatch.clone())?;
            *slot = Some(member);
        }
        if let (Some(brand), Some(first)) = (&self.brand, canonical.first_mut()) {
            *first = Some(Member::Brand(brand.clone()));
        }
        if inserting_brand {
            info.has_brand = true;
        }

        let order = self.orders.current().ok_or(MinimizeError::NoValidOrdering)?;
        info.permutation = order.to_vec();
        info.members = order
            .iter()
            .map(|&position| canonical.get_mut(position).and_then(Option::take))
            .collect::<Option<Vec<_>>>()
            .ok_or(mismatch)?;
        Ok(())
    }
}

/// Input types of `info` in canonical order.
fn unpermute_types(info: &RecGroupInfo) -> Result<Vec<TypeId>, MinimizeError> {
    let mismatch = MinimizeError::PermutationSizeMismatch {
        members: info.members.len(),
        permutation: info.permutation.len(),
    };
    if info.members.len() != info.permutation.len() {
        return Err(mismatch);
    }
    let mut canonical: Vec<Option<TypeId>> = vec![None; info.members.len()];
    for (member, &position) in info.members.iter().zip(&info.permutation) {
        let slot = canonical.get_mut(position).ok_or_else(|| mismatch.clone())?;
        *slot = member.as_type();
    }
    canonical
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(mismatch)
}

#[cfg(test)]
#[path = "../tests/group_tests.rs"]
mod tests;
