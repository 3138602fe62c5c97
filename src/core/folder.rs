use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::scanner::list_entries;
use crate::error::Result;

pub const INCLUDES: &str = "`includes";
pub const DOCUMENTS: &str = "Documents";
pub const TEST_CASES: &str = "TestCases";
pub const TOOLS: &str = "Tools";
pub const VCDS: &str = "VCDs";
pub const OTHER_FILES: &str = "OtherFiles";

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FolderEntry {
    Folder(Folder),
    File { name: String, path: PathBuf },
}

impl FolderEntry {
    pub fn name(&self) -> &str {
        match self {
            FolderEntry::Folder(folder) => &folder.name,
            FolderEntry::File { name, .. } => name,
        }
    }
}

/// A named group of files, either a classification bucket or a directory
/// whose children are read on first expansion.
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub name: String,
    pub location: Option<PathBuf>,
    children: Vec<FolderEntry>,
    #[serde(skip)]
    loaded: bool,
}

impl Folder {
    /// Bucket with no backing directory; children are pushed by the caller.
    pub fn bucket(name: &str) -> Self {
        Self {
            name: name.to_string(),
            location: None,
            children: Vec::new(),
            loaded: true,
        }
    }

    /// Directory node, unpopulated until [`Folder::read_children`].
    pub fn directory(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            location: Some(path.to_path_buf()),
            children: Vec::new(),
            loaded: false,
        }
    }

    pub fn push_file(&mut self, name: impl Into<String>, path: PathBuf) {
        self.children.push(FolderEntry::File {
            name: name.into(),
            path,
        });
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children read so far; empty for a directory that was never expanded.
    pub fn children(&self) -> &[FolderEntry] {
        &self.children
    }

    /// Populate a directory node on first call, then return its children.
    pub fn read_children(&mut self) -> Result<&[FolderEntry]> {
        if !self.loaded {
            if let Some(location) = &self.location {
                debug!("expanding folder {}", location.display());
                let entries = list_entries(location)?;
                self.children = entries
                    .into_iter()
                    .map(|entry| {
                        if entry.is_dir {
                            FolderEntry::Folder(Folder::directory(&entry.path))
                        } else {
                            FolderEntry::File {
                                name: entry.name,
                                path: entry.path,
                            }
                        }
                    })
                    .collect();
            }
            self.loaded = true;
        }
        Ok(&self.children)
    }

    /// Mutable access to a child folder by name, for nested expansion.
    pub fn child_folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.children.iter_mut().find_map(|entry| match entry {
            FolderEntry::Folder(folder) if folder.name == name => Some(folder),
            _ => None,
        })
    }
}
