//! # VERITREE
//!
//! Module dependency view and simulation driver for flat Verilog projects.
//!
//! The project root is scanned without a full grammar: module headers and
//! `` `include `` directives are located lexically, instantiations are
//! matched by name inside each module body, and root modules are those no
//! other module instantiates. Remaining root entries are sorted into
//! buckets (documents, test cases, tools, waveform dumps, other files) and
//! lazily expanded subdirectories.
//!
//! Per-module actions produce `iverilog` / `vvp` command lines for
//! checking, compiling and running a selected top module.

pub mod actions;
pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;
pub mod terminal;

pub use crate::core::Project;
pub use crate::error::{FsErrorKind, ProjectError};
