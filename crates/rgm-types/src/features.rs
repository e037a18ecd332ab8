//! Feature flags of a module.
//!
//! Passes that only make sense under the GC proposal check `has_gc` first and
//! leave the module untouched otherwise.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FeatureSet: u32 {
        const MVP                = 0;
        const REFERENCE_TYPES    = 1 << 0;
        const GC                 = 1 << 1;
        const CUSTOM_DESCRIPTORS = 1 << 2;
    }
}

impl FeatureSet {
    /// Features needed for nontrivial recursion groups.
    pub const GC_DEFAULTS: Self = Self::REFERENCE_TYPES.union(Self::GC);

    pub const fn has_gc(self) -> bool {
        self.contains(Self::GC)
    }

    pub const fn has_custom_descriptors(self) -> bool {
        self.contains(Self::CUSTOM_DESCRIPTORS)
    }
}
