use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::folder::{self, Folder};
use crate::error::{ProjectError, Result};

const SOURCE_EXTENSIONS: &[&str] = &[".v", ".vh"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".md", ".doc", ".docx", ".xls", ".xlsx"];
const TOOL_EXTENSIONS: &[&str] = &[".py", ".c", ".cpp", ".cc"];
const TEST_CASE_PREFIX: &str = "code";

/// One immediate child of a directory.
#[derive(Debug, Clone)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List the files and subdirectories directly inside `dir`, sorted by name.
///
/// Symlinks and other special entries are left out.
pub fn list_entries(dir: &Path) -> Result<Vec<DirEntryInfo>> {
    if dir.is_file() {
        return Err(ProjectError::fs(
            dir,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk failed"));
            ProjectError::fs(path, source)
        })?;

        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_dir() {
            continue;
        }
        entries.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            is_dir: file_type.is_dir(),
        });
    }
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Source,
    Document,
    TestCase,
    Tool,
    Vcd,
    Other,
}

impl FileCategory {
    /// First matching rule wins: documents, test cases, sources, tools,
    /// waveform dumps, then everything else.
    ///
    /// Source extensions match case-sensitively, the same way the `*.v`
    /// glob handed to iverilog does; the other rules ignore case.
    pub fn classify(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        let has_ext = |exts: &[&str]| exts.iter().any(|ext| lower.ends_with(ext));

        if has_ext(DOCUMENT_EXTENSIONS) {
            FileCategory::Document
        } else if lower.starts_with(TEST_CASE_PREFIX) {
            FileCategory::TestCase
        } else if SOURCE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext)) {
            FileCategory::Source
        } else if has_ext(TOOL_EXTENSIONS) || lower.contains("java") {
            FileCategory::Tool
        } else if lower.ends_with(".vcd") {
            FileCategory::Vcd
        } else {
            FileCategory::Other
        }
    }
}

/// Root entries split into design sources, buckets and subdirectories.
#[derive(Debug, Clone)]
pub struct Classification {
    pub sources: Vec<DirEntryInfo>,
    pub documents: Folder,
    pub test_cases: Folder,
    pub tools: Folder,
    pub vcds: Folder,
    pub other_files: Folder,
    pub directories: Vec<Folder>,
}

impl Classification {
    fn new() -> Self {
        Self {
            sources: Vec::new(),
            documents: Folder::bucket(folder::DOCUMENTS),
            test_cases: Folder::bucket(folder::TEST_CASES),
            tools: Folder::bucket(folder::TOOLS),
            vcds: Folder::bucket(folder::VCDS),
            other_files: Folder::bucket(folder::OTHER_FILES),
            directories: Vec::new(),
        }
    }

    /// Source file names relative to the root.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }

    /// Non-empty buckets in display order, then every subdirectory.
    /// `includes` goes first when it has entries.
    pub fn into_buckets(self, includes: Folder) -> Vec<Folder> {
        [
            includes,
            self.documents,
            self.test_cases,
            self.tools,
            self.vcds,
            self.other_files,
        ]
        .into_iter()
        .filter(|bucket| !bucket.is_empty())
        .chain(self.directories)
        .collect()
    }
}

/// Sorts the immediate entries of a project root into categories.
pub struct ProjectClassifier;

impl ProjectClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn scan_directory(&self, root_path: &Path) -> Result<Classification> {
        let entries = list_entries(root_path)?;
        Ok(self.classify(entries))
    }

    pub fn classify(&self, entries: Vec<DirEntryInfo>) -> Classification {
        let mut result = Classification::new();

        for entry in entries {
            if entry.is_dir {
                result.directories.push(Folder::directory(&entry.path));
                continue;
            }
            let bucket = match FileCategory::classify(&entry.name) {
                FileCategory::Source => {
                    result.sources.push(entry);
                    continue;
                }
                FileCategory::Document => &mut result.documents,
                FileCategory::TestCase => &mut result.test_cases,
                FileCategory::Tool => &mut result.tools,
                FileCategory::Vcd => &mut result.vcds,
                FileCategory::Other => &mut result.other_files,
            };
            bucket.push_file(entry.name, entry.path);
        }

        result
    }
}

impl Default for ProjectClassifier {
    fn default() -> Self {
        Self::new()
    }
}
