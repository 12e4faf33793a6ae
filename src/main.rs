use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use termtag::companion::CompanionTool;
use termtag::bridge::OsascriptBridge;
use termtag::manager::WindowManager;
use termtag::store::MappingStore;
use termtag::{NamingScheme, TitleStyle};

mod cli;

#[derive(Parser)]
#[command(name = "termtag")]
#[command(about = "Create, label and find Terminal.app windows by project name")]
#[command(version)]
struct Cli {
    /// Data directory for the mapping documents (defaults to ~/.termtag)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Bound on a single osascript invocation, in seconds
    #[arg(long, global = true, default_value_t = 15)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new terminal window at a folder and map it to a name
    Create {
        /// Project name (becomes the window title)
        name: String,
        /// Folder the new window's shell changes into
        folder: String,
        /// Title the window "[name] <folder segment>" instead of just the name
        #[arg(long)]
        bracket_title: bool,
    },

    /// List currently open terminal windows
    List,

    /// Show the stored window mappings
    Windows,

    /// Show the recent project list
    Projects,

    /// Bring a window to the front
    Focus { id: String },

    /// Retitle a window and update its mapping
    Rename { id: String, name: String },

    /// Close a window (its mapping is kept; see forget)
    Close { id: String },

    /// Drop the stored mapping for a window without touching the window
    Forget { id: String },

    /// Rename every open window according to a naming scheme
    Apply {
        #[arg(value_enum)]
        scheme: SchemeArg,
    },

    /// Prune mappings whose window no longer exists
    Reconcile,

    /// Invoke the companion automation tool
    Companion {
        /// Path to the companion binary
        #[arg(long, default_value = "hoodrobot")]
        binary: PathBuf,

        #[command(subcommand)]
        action: CompanionAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    /// Project-1, Project-2, ...
    Project,
    /// Main, Development, Testing, ... then Terminal-N
    Function,
    /// Workspace-A .. Workspace-J, then Workspace-N
    Workspace,
}

impl From<SchemeArg> for NamingScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Project => NamingScheme::Project,
            SchemeArg::Function => NamingScheme::Function,
            SchemeArg::Workspace => NamingScheme::Workspace,
        }
    }
}

#[derive(Subcommand)]
enum CompanionAction {
    /// Report whether the companion process is running
    Status,
    /// Capture a screenshot into the current terminal
    Screenshot,
    /// Send a file to the current terminal
    SendFile { path: PathBuf },
    /// Capture the current terminal's output
    CaptureOutput,
    /// Toggle focus indicators
    ToggleFocus,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let data_dir = cli.data_dir.unwrap_or_else(MappingStore::default_dir);
    let bridge = Arc::new(OsascriptBridge::with_timeout(Duration::from_secs(
        cli.timeout,
    )));
    let manager = WindowManager::new(bridge, MappingStore::new(data_dir));

    match cli.command {
        Commands::Create {
            name,
            folder,
            bracket_title,
        } => {
            let style = if bracket_title {
                TitleStyle::Bracketed
            } else {
                TitleStyle::Plain
            };
            let manager = manager.with_title_style(style);
            cli::window::create_command(&manager, &name, &folder).await?;
        }
        Commands::List => {
            cli::window::list_command(&manager).await?;
        }
        Commands::Windows => {
            cli::window::mappings_command(&manager)?;
        }
        Commands::Projects => {
            cli::project::projects_command(&manager)?;
        }
        Commands::Focus { id } => {
            cli::window::focus_command(&manager, &id).await?;
        }
        Commands::Rename { id, name } => {
            cli::window::rename_command(&manager, &id, &name).await?;
        }
        Commands::Close { id } => {
            cli::window::close_command(&manager, &id).await?;
        }
        Commands::Forget { id } => {
            cli::window::forget_command(&manager, &id)?;
        }
        Commands::Apply { scheme } => {
            cli::scheme::apply_command(&manager, scheme.into()).await?;
        }
        Commands::Reconcile => {
            cli::window::reconcile_command(&manager).await?;
        }
        Commands::Companion { binary, action } => {
            let tool = CompanionTool::new(binary);
            match action {
                CompanionAction::Status => cli::companion::status_command(&tool).await?,
                CompanionAction::Screenshot => cli::companion::screenshot_command(&tool)?,
                CompanionAction::SendFile { path } => {
                    cli::companion::send_file_command(&tool, &path)?;
                }
                CompanionAction::CaptureOutput => cli::companion::capture_output_command(&tool)?,
                CompanionAction::ToggleFocus => cli::companion::toggle_focus_command(&tool)?,
            }
        }
    }

    Ok(())
}
