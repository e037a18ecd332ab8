use super::*;
use crate::builder::TypeBuilder;
use crate::features::FeatureSet;
use crate::module::{Function, Global};
use crate::types::{BasicHeapType, TypeDef};

fn module_with_three_funcs() -> (Module, Vec<TypeId>) {
    let mut module = Module::new(FeatureSet::GC_DEFAULTS);
    let mut builder = TypeBuilder::new(3);
    builder.set(0, TypeDef::func(vec![], vec![]));
    builder.set(1, TypeDef::func(vec![ValType::I32], vec![]));
    builder.set(2, TypeDef::func(vec![ValType::I64], vec![]));
    let built = builder.build(&mut module.store).expect("valid request");
    (module, built)
}

#[test]
fn test_map_types_patches_functions_and_globals() {
    let (mut module, t) = module_with_three_funcs();
    module.functions.push(Function::new("f", t[0]));
    module.functions.push(Function::new("g", t[2]));
    module
        .globals
        .push(Global::new("a", ValType::nullable(HeapType::Defined(t[0]))));
    module
        .globals
        .push(Global::new("b", ValType::nullable(HeapType::Basic(BasicHeapType::Any))));

    let mut old_to_new = FxHashMap::default();
    old_to_new.insert(t[0], t[1]);
    GlobalTypeRewriter::new(&mut module).map_types(&old_to_new);

    assert_eq!(module.functions[0].sig, t[1]);
    assert_eq!(module.functions[1].sig, t[2]);
    assert_eq!(
        module.globals[0].ty,
        ValType::nullable(HeapType::Defined(t[1]))
    );
    assert_eq!(
        module.globals[1].ty,
        ValType::nullable(HeapType::Basic(BasicHeapType::Any))
    );
}

#[test]
fn test_map_type_names_handles_swaps() {
    let (mut module, t) = module_with_three_funcs();
    module.declare_type(t[0], "first");
    module.declare_type(t[1], "second");
    module
        .type_names
        .get_mut(&t[1])
        .expect("declared")
        .field_names
        .insert(0, "x".to_string());

    let mut old_to_new = FxHashMap::default();
    old_to_new.insert(t[0], t[1]);
    old_to_new.insert(t[1], t[0]);
    GlobalTypeRewriter::new(&mut module).map_type_names_and_indices(&old_to_new);

    assert_eq!(module.types, vec![t[1], t[0]]);
    assert_eq!(module.type_names[&t[1]].name, "first");
    assert_eq!(module.type_names[&t[0]].name, "second");
    assert_eq!(module.type_names[&t[0]].field_names[&0], "x");
    assert_eq!(module.type_by_name("first"), Some(t[1]));
}
