use std::path::{Path, PathBuf};
use veritree::core::{Module, ModuleRegistry};
use veritree::parsers::ModuleDef;

fn module(name: &str, file: &str, body: &str) -> Module {
    Module::new(
        ModuleDef {
            name: name.to_string(),
            body: body.to_string(),
            line: 3,
        },
        file.to_string(),
        PathBuf::from("/proj").join(file),
    )
}

#[test]
fn same_name_in_same_file_replaces_definition() {
    let mut registry = ModuleRegistry::new();
    let first = registry.register(module("m", "m.v", "old"));
    let second = registry.register(module("m", "m.v", "new"));

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry[first].body, "new");
}

#[test]
fn same_name_in_other_file_is_a_separate_module() {
    let mut registry = ModuleRegistry::new();
    let a = registry.register(module("m", "a.v", ""));
    let b = registry.register(module("m", "b.v", ""));

    assert_ne!(a, b);
    assert_eq!(registry.names().to_vec(), vec!["m".to_string()]);
    assert_eq!(registry.find("m", None), Some(a));
    assert_eq!(registry.find("m", Some("b.v")), Some(b));
    assert_eq!(registry.find("m", Some("c.v")), None);
}

#[test]
fn submodules_keep_insertion_order() {
    let mut registry = ModuleRegistry::new();
    let top = registry.register(module("top", "top.v", ""));
    let x = registry.register(module("x", "x.v", ""));
    let y = registry.register(module("y", "y.v", ""));

    registry.add_instantiation(top, y, "u_y".to_string());
    registry.add_instantiation(top, x, "u_x".to_string());
    registry.add_instantiation(top, y, "u_y2".to_string());

    assert_eq!(
        registry.submodules(top),
        vec![("u_y", y), ("u_x", x), ("u_y2", y)]
    );
}

#[test]
fn self_instantiation_counts_as_reference() {
    let mut registry = ModuleRegistry::new();
    let rec = registry.register(module("rec", "rec.v", ""));
    let top = registry.register(module("top", "top.v", ""));
    registry.add_instantiation(rec, rec, "again".to_string());

    assert!(!registry.is_unreferenced(rec));
    assert_eq!(registry.roots(), vec![top]);
}

#[test]
fn defined_in_lists_modules_of_one_file() {
    let mut registry = ModuleRegistry::new();
    let a = registry.register(module("a", "pair.v", ""));
    let b = registry.register(module("b", "pair.v", ""));
    registry.register(module("c", "c.v", ""));

    let ids: Vec<_> = registry.defined_in(Path::new("/proj/pair.v")).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(registry[a].line_number, 3);
}
