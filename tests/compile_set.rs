use std::collections::BTreeSet;
use std::path::PathBuf;
use veritree::core::{CompileSetCalculator, Module, ModuleRegistry};
use veritree::parsers::ModuleDef;

fn module(name: &str, file: &str) -> Module {
    Module::new(
        ModuleDef {
            name: name.to_string(),
            body: String::new(),
            line: 0,
        },
        file.to_string(),
        PathBuf::from("/proj").join(file),
    )
}

fn files(names: &[&str]) -> BTreeSet<PathBuf> {
    names.iter().map(|n| PathBuf::from("/proj").join(n)).collect()
}

#[test]
fn instantiation_cycle_terminates() {
    let mut registry = ModuleRegistry::new();
    let a = registry.register(module("a", "a.v"));
    let b = registry.register(module("b", "b.v"));
    registry.add_instantiation(a, b, "ub".to_string());
    registry.add_instantiation(b, a, "ua".to_string());

    let calc = CompileSetCalculator::new(&registry);
    assert_eq!(calc.files_for(a), files(&["a.v", "b.v"]));
    assert_eq!(calc.files_for(b), files(&["a.v", "b.v"]));
}

#[test]
fn transitive_files_are_collected_once() {
    let mut registry = ModuleRegistry::new();
    let top = registry.register(module("top", "top.v"));
    let alu = registry.register(module("alu", "alu.v"));
    let adder = registry.register(module("adder", "adder.v"));
    let unused = registry.register(module("unused", "unused.v"));
    registry.add_instantiation(top, alu, "u_alu".to_string());
    registry.add_instantiation(top, adder, "u_add".to_string());
    registry.add_instantiation(alu, adder, "u_add".to_string());

    let calc = CompileSetCalculator::new(&registry);
    assert_eq!(calc.files_for(top), files(&["top.v", "alu.v", "adder.v"]));
    assert_eq!(calc.files_for(unused), files(&["unused.v"]));
}

#[test]
fn sibling_module_in_same_file_pulls_its_dependencies() {
    let mut registry = ModuleRegistry::new();
    let top = registry.register(module("top", "top.v"));
    let helper = registry.register(module("helper", "top.v"));
    let adder = registry.register(module("adder", "adder.v"));
    registry.add_instantiation(top, helper, "h".to_string());
    registry.add_instantiation(helper, adder, "a".to_string());

    let calc = CompileSetCalculator::new(&registry);
    assert_eq!(calc.files_for(top), files(&["top.v", "adder.v"]));
}

#[test]
fn unrelated_module_in_target_file_contributes_its_dependencies() {
    let mut registry = ModuleRegistry::new();
    let top = registry.register(module("top", "top.v"));
    let other = registry.register(module("other", "top.v"));
    let lib = registry.register(module("lib", "lib.v"));
    registry.add_instantiation(other, lib, "u_lib".to_string());

    let calc = CompileSetCalculator::new(&registry);
    assert!(registry.submodules(top).is_empty());
    assert_eq!(calc.files_for(top), files(&["top.v", "lib.v"]));
    assert_eq!(calc.files_for(lib), files(&["lib.v"]));
}
