use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::core::Project;

/// JSON document of the analysed project.
///
/// Modules form a flat table; `roots` and each module's `children` refer to
/// entries of that table by `id`, so shared and cyclic instantiations are
/// written once.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn format_to_file(&self, project: &Project, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_project(project)?)?;
        Ok(())
    }

    pub fn format_project(&self, project: &Project) -> Result<String> {
        let value = self.to_value(project);
        let text = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    pub fn to_value(&self, project: &Project) -> Value {
        let modules: Vec<Value> = project
            .registry()
            .modules()
            .map(|(id, module)| {
                let children: Vec<Value> = project
                    .submodules(id)
                    .into_iter()
                    .map(|(instance, child)| json!({ "instance": instance, "module": child.index() }))
                    .collect();
                json!({
                    "id": id.index(),
                    "name": module.name,
                    "file": module.file_name,
                    "line": module.line_number,
                    "children": children,
                })
            })
            .collect();
        let roots: Vec<usize> = project.root_modules().iter().map(|id| id.index()).collect();

        json!({
            "root": project.root(),
            "state": project.state(),
            "sources": project.source_files(),
            "modules": modules,
            "roots": roots,
            "includes": project.includes(),
            "buckets": project.buckets(),
            "skipped": project.skipped_files(),
        })
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
