//! Main CLI application structure

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{list, task};
use crate::domain::ToDoListCollection;
use crate::server::{self, AppState};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "A small to-do list manager with a web API")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new todo project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Run the web server
    Serve {
        /// Port to listen on (defaults to the configured port, 4000)
        port: Option<u16>,

        /// Address to bind
        #[arg(long, env = "TODO_HOST")]
        host: Option<String>,

        /// Directory of static files to serve outside /api
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Manage lists
    #[command(subcommand)]
    List(list::ListCommands),

    /// Manage tasks within a list
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Print all lists in their stored JSON form
    Export,

    /// Replace all lists with the contents of a JSON file
    Import {
        /// File holding a JSON array of lists
        file: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load()?.global.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("todo starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx("init", &format!("Created .todo directory at: {}", project.todo_dir().display()));
            output.success(&format!("Initialized todo project at {}", project.root().display()));
        }

        Commands::Serve { port, host, static_dir } => serve(&output, port, host, static_dir)?,

        Commands::List(cmd) => list::run(cmd, &output)?,
        Commands::Task(cmd) => task::run(cmd, &output)?,

        Commands::Export => {
            let project = Project::open_current()?;
            let collection = project.store().read()?;
            output.verbose_ctx("export", &format!("Exporting {} list(s)", collection.len()));
            println!("{}", collection.to_json()?);
        }

        Commands::Import { file } => import(&output, &file)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Starts the web server for the current project
fn serve(
    output: &Output,
    port: Option<u16>,
    host: Option<String>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    init_tracing(output);

    let project = Project::open_current()?;
    let mut server_config = project.config().project.server.clone();
    if let Some(host) = host {
        server_config.host = host;
    }
    let addr = server_config.bind_addr(port)?;
    let static_dir = static_dir.or(server_config.static_dir);
    output.verbose_ctx("serve", &format!("Binding {}, static dir: {:?}", addr, static_dir));

    let state = AppState::load(project.store())?.shared();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(server::start_server(&addr, state, static_dir))
        .with_context(|| format!("Server on {} failed", addr))
}

/// Installs the tracing subscriber; `RUST_LOG` overrides the default level
fn init_tracing(output: &Output) {
    let default_level = if output.is_verbose() { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Loads lists from a JSON file and replaces the stored collection
fn import(output: &Output, file: &Path) -> Result<()> {
    let project = Project::open_current()?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;
    let imported = ToDoListCollection::from_json(&content)
        .with_context(|| format!("Invalid lists in {}", file.display()))?;
    output.verbose_ctx("import", &format!("Parsed {} list(s)", imported.len()));

    let count = imported.len();
    project.store().write(&imported)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "imported": count,
            "path": project.store().path().display().to_string(),
        }));
    } else {
        output.success(&format!("Imported {} list(s) from {}", count, file.display()));
    }

    Ok(())
}
