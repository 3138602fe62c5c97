//! Error types shared by the analysis pipeline and the per-module actions.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of filesystem failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    NotFound,
    IsADirectory,
    AlreadyExists,
    NoPermission,
    Other,
}

impl FsErrorKind {
    pub fn classify(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsErrorKind::NotFound,
            io::ErrorKind::IsADirectory => FsErrorKind::IsADirectory,
            io::ErrorKind::AlreadyExists => FsErrorKind::AlreadyExists,
            io::ErrorKind::PermissionDenied => FsErrorKind::NoPermission,
            _ => FsErrorKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FsErrorKind::NotFound => "not found",
            FsErrorKind::IsADirectory => "is a directory",
            FsErrorKind::AlreadyExists => "already exists",
            FsErrorKind::NoPermission => "no permission",
            FsErrorKind::Other => "unknown",
        }
    }
}

impl std::fmt::Display for FsErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ProjectError {
    /// Directory listing or document read failed
    #[error("{path}: {kind} ({source})")]
    Fs {
        path: PathBuf,
        kind: FsErrorKind,
        #[source]
        source: io::Error,
    },

    /// Config file could not be read or parsed
    #[error("invalid config file '{path}': {message}")]
    Config { path: PathBuf, message: String },

    #[error("module '{name}' not found in project")]
    ModuleNotFound { name: String },

    #[error("project has not been analyzed yet")]
    NotAnalyzed,

    /// A fan-out task panicked or was cancelled
    #[error("analysis task failed: {0}")]
    Task(String),
}

impl ProjectError {
    pub fn fs(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Fs {
            path: path.as_ref().to_path_buf(),
            kind: FsErrorKind::classify(&source),
            source,
        }
    }

    pub fn module_not_found(name: impl Into<String>) -> Self {
        Self::ModuleNotFound { name: name.into() }
    }

    /// Filesystem classification, if this is a filesystem error.
    pub fn fs_kind(&self) -> Option<FsErrorKind> {
        match self {
            Self::Fs { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectError>;
