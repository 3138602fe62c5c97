pub mod common;
pub mod verilog;

pub use verilog::VerilogScanner;

/// A `module ... endmodule` block found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    pub name: String,
    /// Text between the header's `;` and `endmodule`
    pub body: String,
    /// Zero-based line of the `module` keyword
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub modules: Vec<ModuleDef>,
    /// Raw include targets, unfiltered and possibly repeated
    pub includes: Vec<String>,
}
