//! Tabkeep CLI - Command-line interface for editor session state.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "tabkeep")]
#[command(about = "Remembers which file you were editing in each repository", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new tabkeep workspace
    Init,
    /// Show the current repository and file
    Status,
    /// Repository management
    Repos {
        #[command(subcommand)]
        command: Option<RepoCommands>,
    },
    /// Switch to a repository and reopen its last file
    Use {
        /// Repository name
        repo: String,
    },
    /// Open a file as the current file
    Open {
        /// Repository name
        repo: String,
        /// Path inside the repository (e.g., /notes/todo.md)
        path: String,
    },
    /// Close the current file
    Close,
    /// Show recently opened files
    Recent {
        /// Repository name (defaults to the current repository)
        repo: Option<String>,
        /// Maximum number of entries per repository
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Show every repository
        #[arg(long)]
        all: bool,
    },
    /// Print the file tree of a repository
    Tree {
        /// Repository name (defaults to the current repository)
        repo: Option<String>,
    },
    /// List starred files
    Marked,
    /// Open a help document
    Help {
        /// Document name (e.g., FEATURES.md)
        doc: String,
    },
    /// Manage open tabs
    Tabs {
        #[command(subcommand)]
        command: Option<TabCommands>,
    },
    /// Toggle a panel
    Toggle {
        /// Panel to toggle
        panel: Panel,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// List configured repositories
    List,
    /// Register a repository directory
    Add {
        /// Repository name
        name: String,
        /// Root directory (relative paths resolve against the workspace)
        path: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum TabCommands {
    /// List open tabs
    List,
    /// Add the current file as a tab
    Pin,
    /// Remove a tab by position (1-based)
    Remove {
        /// Tab position
        index: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Panel {
    /// The side bar
    Side,
    /// The preview pane
    View,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Status => commands::status::run(),
        Commands::Repos { command } => match command.unwrap_or(RepoCommands::List) {
            RepoCommands::List => commands::repos::list(),
            RepoCommands::Add { name, path } => commands::repos::add(&name, path),
        },
        Commands::Use { repo } => commands::open::use_repo(&repo),
        Commands::Open { repo, path } => commands::open::open(&repo, &path),
        Commands::Close => commands::open::close(),
        Commands::Recent { repo, limit, all } => {
            commands::recent::run(repo.as_deref(), limit, all)
        }
        Commands::Tree { repo } => commands::tree::run(repo.as_deref()),
        Commands::Marked => commands::marked::run(),
        Commands::Help { doc } => commands::help::run(&doc),
        Commands::Tabs { command } => match command.unwrap_or(TabCommands::List) {
            TabCommands::List => commands::tabs::list(),
            TabCommands::Pin => commands::tabs::pin(),
            TabCommands::Remove { index } => commands::tabs::remove(index),
        },
        Commands::Toggle { panel } => match panel {
            Panel::Side => commands::tabs::toggle_side(),
            Panel::View => commands::tabs::toggle_view(),
        },
    }
}
