//! Simulation settings.
//!
//! Read from `<root>/.veritree.toml`:
//!
//! ```toml
//! [simulation]
//! compile_output_file = "build/sim.out"
//! vvp_output_file = "sim.log"
//! ```
//!
//! Missing file or keys fall back to defaults; command line flags override
//! individual keys afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ProjectError, Result};

pub const CONFIG_FILE_NAME: &str = ".veritree.toml";

const DEFAULT_COMPILE_OUTPUT: &str = "a.out";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub simulation: Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target of `iverilog -o`
    pub compile_output_file: String,
    /// Where vvp stdout is redirected; empty disables redirection
    pub vvp_output_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compile_output_file: DEFAULT_COMPILE_OUTPUT.to_string(),
            vvp_output_file: String::new(),
        }
    }
}

impl Settings {
    /// Load settings for a project root, defaults when no config file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ProjectError::fs(path, e))?;
        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ProjectError::Config {
            path: PathBuf::from(path),
            message: e.to_string(),
        })?;
        debug!(
            "loaded config from {}: output={:?} vvp={:?}",
            path.display(),
            file.simulation.compile_output_file,
            file.simulation.vvp_output_file
        );
        Ok(file.simulation)
    }

    pub fn with_overrides(mut self, compile_output: Option<String>, vvp_output: Option<String>) -> Self {
        if let Some(output) = compile_output {
            self.compile_output_file = output;
        }
        if let Some(vvp) = vvp_output {
            self.vvp_output_file = vvp;
        }
        self
    }

    /// Compile output path, always quoted.
    pub fn quoted_compile_output(&self) -> String {
        format!("\"{}\"", self.compile_output_file)
    }

    /// Simulation output path quoted, or `None` when redirection is off.
    pub fn quoted_vvp_output(&self) -> Option<String> {
        if self.vvp_output_file.is_empty() {
            None
        } else {
            Some(format!("\"{}\"", self.vvp_output_file))
        }
    }
}
