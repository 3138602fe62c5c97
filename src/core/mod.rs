pub mod analyzer;
pub mod compile_set;
pub mod folder;
pub mod graph;
pub mod resolver;
pub mod scanner;

pub use analyzer::{AnalysisState, IncludeFile, Project};
pub use compile_set::CompileSetCalculator;
pub use folder::{Folder, FolderEntry};
pub use graph::{Instantiation, Module, ModuleGraph, ModuleId, ModuleRegistry};
pub use resolver::DependencyResolver;
pub use scanner::{Classification, FileCategory, ProjectClassifier};
