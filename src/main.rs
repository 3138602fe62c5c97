use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use veritree::actions::{Action, ShellKind};
use veritree::config::Settings;
use veritree::core::{FolderEntry, Project};
use veritree::formatters::{JsonFormatter, TreeFormatter};
use veritree::terminal::{EchoTerminal, ShellTerminal, Terminal};

#[derive(Debug, Parser)]
#[command(
    name = "veritree",
    version,
    about = "Verilog project tree - module dependencies and iverilog/vvp driver"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Args)]
struct GlobalArgs {
    /// Project root directory
    #[arg(short, long, value_name = "DIR", default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/.veritree.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print root modules, their instantiation trees and file buckets
    Tree {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Single-line JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List the files needed to compile a module
    Files {
        /// Module name, or name@file
        module: String,
    },
    /// Elaborate a module without producing output
    Check(ActionArgs),
    /// Compile a module with iverilog
    Compile(ActionArgs),
    /// Compile a module and simulate it with vvp
    Run(ActionArgs),
    /// Expand a subdirectory of the project root
    Ls {
        /// Subdirectory path relative to the root, e.g. `lib/rtl`
        dir: String,
    },
}

#[derive(Debug, Clone, Args)]
struct ActionArgs {
    /// Module name, or name@file
    module: String,

    /// Print the command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Shell flavour used to chain compile and simulate
    #[arg(long, value_enum)]
    shell: Option<ShellKind>,

    /// Override the compile output file
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    /// Override the simulation output file
    #[arg(long, value_name = "FILE")]
    vvp_output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.global.quiet {
        Level::ERROR
    } else if cli.global.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    let start_time = Instant::now();

    let mut project = Project::new(global.root.clone());
    project
        .wait_for_accomplish()
        .await
        .with_context(|| format!("failed to analyze {}", global.root.display()))?;
    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    match command {
        Commands::Tree {
            json,
            compact,
            output,
        } => {
            let formatter = if compact {
                JsonFormatter::new().compact()
            } else {
                JsonFormatter::new()
            };
            match output {
                Some(path) => {
                    if json {
                        formatter.format_to_file(&project, &path)?;
                    } else {
                        TreeFormatter::new().format_to_file(&project, &path)?;
                    }
                    info!("Wrote {}", path.display());
                }
                None if json => println!("{}", formatter.format_project(&project)?),
                None => print!("{}", TreeFormatter::new().format_project(&project)),
            }
        }
        Commands::Files { module } => {
            let id = project.find_module(&module)?;
            for file in project.compile_set(id)? {
                println!("{}", file.display());
            }
        }
        Commands::Check(args) => execute(&project, &global, Action::Check, args)?,
        Commands::Compile(args) => execute(&project, &global, Action::Compile, args)?,
        Commands::Run(args) => execute(&project, &global, Action::Run, args)?,
        Commands::Ls { dir } => {
            let mut parts = dir.split('/').filter(|p| !p.is_empty());
            let first = parts.next().unwrap_or_default();
            let mut folder = project
                .bucket_mut(first)
                .with_context(|| format!("no directory named '{first}' in project root"))?;
            for part in parts {
                folder.read_children()?;
                folder = folder
                    .child_folder_mut(part)
                    .with_context(|| format!("no directory named '{part}' in '{dir}'"))?;
            }
            for entry in folder.read_children()? {
                match entry {
                    FolderEntry::Folder(child) => println!("{}/", child.name),
                    FolderEntry::File { name, .. } => println!("{name}"),
                }
            }
        }
    }

    Ok(())
}

fn execute(project: &Project, global: &GlobalArgs, action: Action, args: ActionArgs) -> Result<()> {
    let id = project.find_module(&args.module)?;
    let module_name = &project.registry()[id].name;

    let settings = match &global.config {
        Some(path) => Settings::load_file(path)?,
        None => Settings::load(project.root())?,
    }
    .with_overrides(args.output, args.vvp_output);
    let shell = args.shell.unwrap_or_default();

    let command = action.command(module_name, &settings, shell);
    if args.dry_run {
        EchoTerminal::new(std::io::stdout().lock()).send(&command)
    } else {
        ShellTerminal::new(shell, project.root()).send(&command)
    }
}
