use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::graph::{ModuleId, ModuleRegistry};

/// Files needed to compile a module: its own file plus the files of every
/// module reachable through instantiations.
///
/// Traversal is per file. Visiting a file walks the instantiations of every
/// module defined in it, since the compiler reads the whole file. A file
/// already in the set is never walked again, which also bounds the walk
/// on instantiation cycles.
pub struct CompileSetCalculator<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> CompileSetCalculator<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    pub fn files_for(&self, module: ModuleId) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        if let Some(root) = self.registry.get(module) {
            let path = root.file_path.clone();
            files.insert(path.clone());
            self.visit_file(&path, &mut files);
        }
        files
    }

    fn visit_file(&self, file: &Path, files: &mut BTreeSet<PathBuf>) {
        let children: Vec<ModuleId> = self
            .registry
            .defined_in(file)
            .flat_map(|id| self.registry.submodules(id))
            .map(|(_, child)| child)
            .collect();

        for child in children {
            let Some(module) = self.registry.get(child) else {
                continue;
            };
            if files.insert(module.file_path.clone()) {
                self.visit_file(&module.file_path, files);
            }
        }
    }
}
