use anyhow::Result;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{folder, Folder, FolderEntry, ModuleId, Project};

const INDENT: &str = "  ";

/// Plain-text rendering of the project tree.
///
/// Top level: the include bucket, root modules sorted by name, then the
/// remaining buckets. Module children read `instance  -  module (file)`.
/// Each module is expanded once per render; later visits print the line
/// with `[shown above]`, and instantiation cycles end with `[recursive]`.
pub struct TreeFormatter;

/// Walk state shared across one render.
struct Walk {
    /// Modules on the current root-to-node path
    path: Vec<ModuleId>,
    expanded: HashSet<ModuleId>,
}

impl TreeFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, project: &Project, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_project(project))?;
        Ok(())
    }

    pub fn format_project(&self, project: &Project) -> String {
        let mut out = String::new();

        let (includes, others): (Vec<&Folder>, Vec<&Folder>) = project
            .buckets()
            .iter()
            .partition(|bucket| bucket.name == folder::INCLUDES);

        for bucket in includes {
            self.write_folder(&mut out, bucket, 0);
        }

        let mut roots = project.root_modules().to_vec();
        sort_by_name(project, &mut roots);
        let mut walk = Walk {
            path: Vec::new(),
            expanded: HashSet::new(),
        };
        for id in roots {
            self.write_module(&mut out, project, id, None, 0, &mut walk);
        }

        for bucket in others {
            self.write_folder(&mut out, bucket, 0);
        }

        if out.is_empty() {
            out.push_str("No verilog project in this directory\n");
        }
        out
    }

    fn write_module(
        &self,
        out: &mut String,
        project: &Project,
        id: ModuleId,
        instance: Option<&str>,
        depth: usize,
        walk: &mut Walk,
    ) {
        let Some(module) = project.module(id) else {
            return;
        };
        let prefix = instance.map(|i| format!("{i}  -  ")).unwrap_or_default();
        let has_children = !project.submodules(id).is_empty();
        let marker = if walk.path.contains(&id) {
            " [recursive]"
        } else if has_children && walk.expanded.contains(&id) {
            " [shown above]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{}{}{} ({}){}",
            INDENT.repeat(depth),
            prefix,
            module.name,
            module.file_name,
            marker
        );
        if !marker.is_empty() || !walk.expanded.insert(id) {
            return;
        }

        let mut children = project.submodules(id);
        children.sort_by(|a, b| project.registry()[a.1].name.cmp(&project.registry()[b.1].name));

        walk.path.push(id);
        for (inst, child) in children {
            self.write_module(out, project, child, Some(inst), depth + 1, walk);
        }
        walk.path.pop();
    }

    fn write_folder(&self, out: &mut String, folder: &Folder, depth: usize) {
        let _ = writeln!(out, "{}{}/", INDENT.repeat(depth), folder.name);
        if !folder.is_loaded() {
            return;
        }
        let mut entries: Vec<&FolderEntry> = folder.children().iter().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        for entry in entries {
            match entry {
                FolderEntry::Folder(child) => self.write_folder(out, child, depth + 1),
                FolderEntry::File { name, .. } => {
                    let _ = writeln!(out, "{}{}", INDENT.repeat(depth + 1), name);
                }
            }
        }
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_by_name(project: &Project, ids: &mut [ModuleId]) {
    ids.sort_by(|a, b| project.registry()[*a].name.cmp(&project.registry()[*b].name));
}
