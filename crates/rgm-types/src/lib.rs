//! Type universe and module collaborators for the rgm passes.
//!
//! This crate provides the pieces the recursion group passes operate on:
//! - Heap type handles and structural definitions (`TypeId`, `HeapType`, `TypeDef`)
//! - The hash-consing type store with isorecursive canonicalization (`TypeStore`)
//! - The type-construction request (`TypeBuilder`)
//! - Group shapes used to decide type identity (`GroupShape`, `RecGroupShape`)
//! - The module model, visibility collection and the global type rewriter

// Feature flags gating GC-only passes
pub mod features;
pub use features::FeatureSet;

// Heap types and structural definitions
pub mod types;
pub use types::{
    BasicHeapType, Composite, CompositeKind, Field, HeapType, Mutability, RefType, Signature,
    StorageType, TypeDef, TypeId, ValType,
};

// Structural fingerprints of recursion groups
pub mod shape;
pub use shape::{GroupShape, RecGroupShape, ShapeRef, shape_def};

// Hash-consing arena of defined types
pub mod store;
pub use store::{RecGroupId, TypeStore};

// Type construction requests
pub mod builder;
pub use builder::{BuildError, TypeBuilder, TypeRef};

// Module model
pub mod module;
pub use module::{Function, Global, Module, TypeNames};

// Public / private classification of module types
pub mod visibility;
pub use visibility::{FxIndexMap, FxIndexSet, HeapTypeInfo, Visibility, collect_heap_type_info};

// Module-wide reference rewriting
pub mod rewriter;
pub use rewriter::GlobalTypeRewriter;
