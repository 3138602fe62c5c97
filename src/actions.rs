//! Argument vectors for checking, compiling and simulating one module with
//! Icarus Verilog.

use clap::ValueEnum;

use crate::config::Settings;

const COMPILER: &str = "iverilog";
const SIMULATOR: &str = "vvp";
const ALL_SOURCES: &str = "*.v";

/// Shell the command line is handed to; decides how `vvp` is chained
/// after a successful compile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ShellKind {
    #[value(name = "powershell")]
    PowerShell,
    Posix,
}

impl ShellKind {
    pub fn host() -> Self {
        if cfg!(windows) {
            ShellKind::PowerShell
        } else {
            ShellKind::Posix
        }
    }
}

impl Default for ShellKind {
    fn default() -> Self {
        Self::host()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Check,
    Compile,
    Run,
}

impl Action {
    pub fn command(self, module_name: &str, settings: &Settings, shell: ShellKind) -> Vec<String> {
        match self {
            Action::Check => check_command(module_name),
            Action::Compile => compile_command(module_name, settings),
            Action::Run => run_command(module_name, settings, shell),
        }
    }
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Elaborate only: `iverilog -s <top> -t null -Wall *.v`.
pub fn check_command(module_name: &str) -> Vec<String> {
    args(&[COMPILER, "-s", module_name, "-t", "null", "-Wall", ALL_SOURCES])
}

/// `iverilog -s <top> -Wall -o "<out>" *.v`.
pub fn compile_command(module_name: &str, settings: &Settings) -> Vec<String> {
    let output = settings.quoted_compile_output();
    args(&[COMPILER, "-s", module_name, "-Wall", "-o", &output, ALL_SOURCES])
}

/// Compile, then run `vvp` on the result when compilation succeeded.
pub fn run_command(module_name: &str, settings: &Settings, shell: ShellKind) -> Vec<String> {
    let mut command = compile_command(module_name, settings);

    let mut simulate = vec![SIMULATOR.to_string(), settings.quoted_compile_output()];
    if let Some(vvp_output) = settings.quoted_vvp_output() {
        simulate.push(">".to_string());
        simulate.push(vvp_output);
    }

    match shell {
        ShellKind::PowerShell => {
            command.push("; if($?) {".to_string());
            command.extend(simulate);
            command.push("}".to_string());
        }
        ShellKind::Posix => {
            command.push("&&".to_string());
            command.extend(simulate);
        }
    }
    command
}
