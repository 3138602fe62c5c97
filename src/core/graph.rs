use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
    Directed, Direction, Graph,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::parsers::ModuleDef;

pub type ModuleId = NodeIndex;

#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    /// File name relative to the project root
    pub file_name: String,
    pub file_path: PathBuf,
    /// Zero-based line of the header
    pub line_number: usize,
    pub body: String,
}

/// Edge payload: `parent --instance_name--> child`.
#[derive(Debug, Clone)]
pub struct Instantiation {
    pub instance_name: String,
}

pub type ModuleGraph = Graph<Module, Instantiation, Directed>;

impl Module {
    pub fn new(def: ModuleDef, file_name: String, file_path: PathBuf) -> Self {
        Self {
            name: def.name,
            file_name,
            file_path,
            line_number: def.line,
            body: def.body,
        }
    }
}

/// Arena of every module in the project, keyed by (name, defining file).
///
/// Modules refer to each other only through graph edges, so instantiation
/// cycles are plain cycles in the graph.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    graph: ModuleGraph,
    index: HashMap<(String, PathBuf), ModuleId>,
    /// Distinct names in first-registration order
    names: Vec<String>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module; a later definition with the same name in the same file
    /// replaces the earlier one.
    pub fn register(&mut self, module: Module) -> ModuleId {
        let key = (module.name.clone(), module.file_path.clone());
        if let Some(&id) = self.index.get(&key) {
            self.graph[id] = module;
            return id;
        }
        if !self.names.contains(&module.name) {
            self.names.push(module.name.clone());
        }
        let id = self.graph.add_node(module);
        self.index.insert(key, id);
        id
    }

    pub fn add_instantiation(
        &mut self,
        parent: ModuleId,
        child: ModuleId,
        instance_name: String,
    ) -> EdgeIndex {
        self.graph
            .add_edge(parent, child, Instantiation { instance_name })
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.graph.node_weight(id)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All modules in registration order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> + '_ {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Every definition of `name`, in registration order.
    pub fn ids_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ModuleId> + 'a {
        self.graph
            .node_indices()
            .filter(move |&id| self.graph[id].name == name)
    }

    /// Look a module up by name, optionally restricted to a file name.
    pub fn find(&self, name: &str, file_name: Option<&str>) -> Option<ModuleId> {
        self.ids_named(name)
            .find(|&id| file_name.map_or(true, |f| self.graph[id].file_name == f))
    }

    /// Instantiations made by `id`, in the order they were recorded.
    pub fn submodules(&self, id: ModuleId) -> Vec<(&str, ModuleId)> {
        let mut edges: Vec<_> = self.graph.edges_directed(id, Direction::Outgoing).collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| (edge.weight().instance_name.as_str(), edge.target()))
            .collect()
    }

    /// True until some module (possibly itself) instantiates `id`.
    pub fn is_unreferenced(&self, id: ModuleId) -> bool {
        self.graph
            .neighbors_directed(id, Direction::Incoming)
            .next()
            .is_none()
    }

    /// Modules never instantiated by any module in the project.
    pub fn roots(&self) -> Vec<ModuleId> {
        self.graph
            .node_indices()
            .filter(|&id| self.is_unreferenced(id))
            .collect()
    }

    /// Modules defined in the given file.
    pub fn defined_in<'a>(&'a self, file_path: &'a Path) -> impl Iterator<Item = ModuleId> + 'a {
        self.graph
            .node_indices()
            .filter(move |&id| self.graph[id].file_path.as_path() == file_path)
    }
}

impl std::ops::Index<ModuleId> for ModuleRegistry {
    type Output = Module;

    fn index(&self, id: ModuleId) -> &Module {
        &self.graph[id]
    }
}
