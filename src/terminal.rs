//! Process invocation for generated command lines.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use crate::actions::ShellKind;

/// Anything that can take an argument vector and execute or display it.
pub trait Terminal {
    fn send(&mut self, args: &[String]) -> Result<()>;
}

/// Arguments joined by single spaces, the way they are typed into a shell.
pub fn command_line(args: &[String]) -> String {
    args.join(" ")
}

/// Writes the command line instead of running it.
pub struct EchoTerminal<W: Write> {
    out: W,
}

impl<W: Write> EchoTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for EchoTerminal<W> {
    fn send(&mut self, args: &[String]) -> Result<()> {
        writeln!(self.out, "{}", command_line(args))?;
        Ok(())
    }
}

/// Runs the command line through a shell inside the project directory, so
/// `*.v` globbing and command chaining behave as typed.
pub struct ShellTerminal {
    shell: ShellKind,
    working_dir: PathBuf,
}

impl ShellTerminal {
    pub fn new(shell: ShellKind, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            shell,
            working_dir: working_dir.into(),
        }
    }

    fn build(&self, line: &str) -> Command {
        let mut command = match self.shell {
            ShellKind::PowerShell => {
                let mut c = Command::new("powershell");
                c.args(["-NoProfile", "-Command", line]);
                c
            }
            ShellKind::Posix => {
                let mut c = Command::new("sh");
                c.args(["-c", line]);
                c
            }
        };
        command.current_dir(&self.working_dir);
        command
    }
}

impl Terminal for ShellTerminal {
    fn send(&mut self, args: &[String]) -> Result<()> {
        let line = command_line(args);
        info!("Running: {}", line);
        debug!("working directory {}", self.working_dir.display());

        let status = self
            .build(&line)
            .status()
            .with_context(|| format!("failed to start shell for `{line}`"))?;
        if !status.success() {
            bail!("command exited with {status}: {line}");
        }
        Ok(())
    }
}
