use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{
    folder::{self, Folder},
    scanner::{Classification, DirEntryInfo},
    CompileSetCalculator, DependencyResolver, Module, ModuleId, ModuleRegistry,
    ProjectClassifier,
};
use crate::error::{ProjectError, Result};
use crate::parsers::{ParseResult, VerilogScanner};

/// Progress of the analysis epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisState {
    Idle,
    Running,
    Done,
}

/// An `` `include `` target that names a source file in the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeFile {
    pub name: String,
    pub path: PathBuf,
}

/// One project root and everything derived from analysing it.
///
/// The analysis runs once per epoch: [`Project::wait_for_accomplish`] is a
/// no-op after the first call until [`Project::clear`] resets the state.
pub struct Project {
    root: PathBuf,
    classifier: ProjectClassifier,
    scanner: VerilogScanner,
    resolver: DependencyResolver,
    state: AnalysisState,
    source_files: Vec<String>,
    registry: ModuleRegistry,
    root_modules: Vec<ModuleId>,
    includes: Vec<IncludeFile>,
    buckets: Vec<Folder>,
    skipped: Vec<PathBuf>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            classifier: ProjectClassifier::new(),
            scanner: VerilogScanner::new(),
            resolver: DependencyResolver::new(),
            state: AnalysisState::Idle,
            source_files: Vec::new(),
            registry: ModuleRegistry::new(),
            root_modules: Vec::new(),
            includes: Vec::new(),
            buckets: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Run scan, resolve, root derivation and bucketing once.
    ///
    /// Returns immediately when the state is not `Idle`. A failure to list
    /// the root leaves the state `Running`; call [`Project::clear`] before
    /// retrying. Unreadable source files are skipped and reported through
    /// [`Project::skipped_files`].
    pub async fn wait_for_accomplish(&mut self) -> Result<()> {
        if self.state != AnalysisState::Idle {
            debug!("analysis already {:?}, nothing to do", self.state);
            return Ok(());
        }
        self.state = AnalysisState::Running;

        info!("Scanning {}", self.root.display());
        let classification = self.classifier.scan_directory(&self.root)?;
        self.analyze(classification).await
    }

    /// Pipeline stages after the root listing; ends in `Done` unless a
    /// task fails.
    async fn analyze(&mut self, classification: Classification) -> Result<()> {
        self.source_files = classification.source_names();
        info!("Found {} source files", self.source_files.len());

        let parsed = self.scan_sources(&classification.sources).await?;
        for (entry, result) in parsed {
            self.register(entry, result);
        }
        info!(
            "Registered {} modules, {} includes",
            self.registry.len(),
            self.includes.len()
        );

        self.resolve_dependencies().await?;
        self.root_modules = self.registry.roots();
        info!("Derived {} root modules", self.root_modules.len());

        let mut includes = Folder::bucket(folder::INCLUDES);
        for include in &self.includes {
            includes.push_file(include.name.clone(), include.path.clone());
        }
        self.buckets = classification.into_buckets(includes);

        self.state = AnalysisState::Done;
        Ok(())
    }

    /// Read and scan every source file concurrently; results keep file order.
    async fn scan_sources(
        &mut self,
        sources: &[DirEntryInfo],
    ) -> Result<Vec<(DirEntryInfo, ParseResult)>> {
        let mut tasks = JoinSet::new();
        for (idx, entry) in sources.iter().enumerate() {
            let path = entry.path.clone();
            let scanner = self.scanner.clone();
            tasks.spawn(async move {
                let parsed = tokio::fs::read(&path)
                    .await
                    .map(|bytes| scanner.parse_source(&String::from_utf8_lossy(&bytes)));
                (idx, parsed)
            });
        }

        let mut slots: Vec<Option<ParseResult>> = vec![None; sources.len()];
        while let Some(joined) = tasks.join_next().await {
            let (idx, parsed) = joined.map_err(|e| ProjectError::Task(e.to_string()))?;
            match parsed {
                Ok(result) => slots[idx] = Some(result),
                Err(err) => {
                    let err = ProjectError::fs(&sources[idx].path, err);
                    warn!("Skipping source file: {err}");
                    self.skipped.push(sources[idx].path.clone());
                }
            }
        }

        Ok(sources
            .iter()
            .cloned()
            .zip(slots)
            .filter_map(|(entry, slot)| slot.map(|result| (entry, result)))
            .collect())
    }

    fn register(&mut self, entry: DirEntryInfo, result: ParseResult) {
        for def in result.modules {
            debug!("module {} in {} at line {}", def.name, entry.name, def.line);
            self.registry
                .register(Module::new(def, entry.name.clone(), entry.path.clone()));
        }

        for name in result.includes {
            let known = self.source_files.contains(&name);
            if known && !self.includes.iter().any(|inc| inc.name == name) {
                let path = self.root.join(&name);
                self.includes.push(IncludeFile { name, path });
            }
        }
    }

    /// Resolve every module body against the complete registry.
    async fn resolve_dependencies(&mut self) -> Result<()> {
        let registry = std::mem::take(&mut self.registry);
        let resolver = self.resolver.clone();
        let (registry, resolved) = tokio::task::spawn_blocking(move || {
            let resolved = resolver.resolve_all(&registry);
            (registry, resolved)
        })
        .await
        .map_err(|e| ProjectError::Task(e.to_string()))?;

        self.registry = registry;
        let added = DependencyResolver::apply(&mut self.registry, resolved);
        info!("Resolved {} instantiations", added);
        Ok(())
    }

    /// Drop everything derived from the last analysis.
    pub fn clear(&mut self) {
        debug!("clearing project {}", self.root.display());
        self.state = AnalysisState::Idle;
        self.source_files.clear();
        self.registry = ModuleRegistry::new();
        self.root_modules.clear();
        self.includes.clear();
        self.buckets.clear();
        self.skipped.clear();
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    pub fn root_modules(&self) -> &[ModuleId] {
        &self.root_modules
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.registry.get(id)
    }

    pub fn submodules(&self, id: ModuleId) -> Vec<(&str, ModuleId)> {
        self.registry.submodules(id)
    }

    pub fn includes(&self) -> &[IncludeFile] {
        &self.includes
    }

    pub fn buckets(&self) -> &[Folder] {
        &self.buckets
    }

    pub fn bucket_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.buckets.iter_mut().find(|b| b.name == name)
    }

    pub fn skipped_files(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Find a module by `name` or `name@file`.
    ///
    /// A bare name defined in several files picks the first registered
    /// definition.
    pub fn find_module(&self, query: &str) -> Result<ModuleId> {
        if self.state != AnalysisState::Done {
            return Err(ProjectError::NotAnalyzed);
        }
        let (name, file) = match query.split_once('@') {
            Some((name, file)) => (name, Some(file)),
            None => (query, None),
        };
        let id = self
            .registry
            .find(name, file)
            .ok_or_else(|| ProjectError::module_not_found(query))?;
        if file.is_none() && self.registry.ids_named(name).nth(1).is_some() {
            warn!(
                "module {} is defined in several files, using {}",
                name, self.registry[id].file_name
            );
        }
        Ok(id)
    }

    pub fn compile_set(&self, id: ModuleId) -> Result<BTreeSet<PathBuf>> {
        if self.state != AnalysisState::Done {
            return Err(ProjectError::NotAnalyzed);
        }
        Ok(CompileSetCalculator::new(&self.registry).files_for(id))
    }
}
