//! topictree CLI tool
//!
//! Command-line interface for loading topic-map documents and querying the decision tree they
//! describe.
//!
//! ## Commands
//!
//! - `load <path>`: Validate a document and print its root node as JSON
//! - `node <path> <id>`: Print one node as JSON
//! - `paths <path> <id>`: Print every root-to-node path
//! - `ascii <path>`: Dump the whole tree
//! - `walk <path>`: Walk the tree interactively, one choice at a time
//!
//! Every command takes `--config <file>` to override parser and builder settings from TOML.

use clap::{Parser, Subcommand};
use std::{
    io::{BufRead, Write},
    path::PathBuf,
};
use topictree::{config::TreeConfig, session::TreeSession, TopicTreeError};

#[derive(Parser)]
#[command(name = "topictree")]
#[command(author, version, about = "A tool for compiling topic maps into decision trees", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and print its root node
    Load {
        /// Path to the .xtm/.xml or triad document
        path: PathBuf,
    },

    /// Print one node and its immediate children
    Node {
        path: PathBuf,
        /// Entity id
        id: String,
    },

    /// Print every path from the root to an entity
    Paths {
        path: PathBuf,
        /// Entity id
        id: String,
    },

    /// Dump the tree with box-drawing characters
    Ascii { path: PathBuf },

    /// Walk the tree from the root, choosing a numbered answer at each step
    Walk { path: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => TreeConfig::from_file(path)?,
        None => TreeConfig::default(),
    };
    let mut session = TreeSession::new(config);

    match cli.command {
        Commands::Load { path } => {
            let root = session.load_document(&path)?;
            println!("{}", serde_json::to_string_pretty(&root)?);
        }

        Commands::Node { path, id } => {
            session.load_document(&path)?;
            let node = session.get_node(&id)?;
            println!("{}", serde_json::to_string_pretty(&node)?);
        }

        Commands::Paths { path, id } => {
            session.load_document(&path)?;
            let paths = session.get_paths(&id)?;
            if paths.is_empty() {
                eprintln!("Error: '{id}' is not reachable from the root");
                std::process::exit(1);
            }
            for route in paths {
                println!(
                    "{}",
                    route
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join(" → ")
                );
            }
        }

        Commands::Ascii { path } => {
            session.load_document(&path)?;
            print!("{}", session.render_ascii()?);
        }

        Commands::Walk { path } => {
            let mut current = session.load_document(&path)?;
            let stdin = std::io::stdin();
            loop {
                println!("Current node: {}", current.root);
                if let Some(description) = &current.root.description {
                    println!("  {description}");
                }
                if current.is_leaf() {
                    println!("Reached a leaf node.");
                    break;
                }
                println!("Available choices:");
                for (i, child) in current.children.iter().enumerate() {
                    println!("{}. {}", i + 1, child.answer.label);
                }

                print!("Enter your choice (1, 2, ...): ");
                std::io::stdout().flush()?;
                let mut input = String::new();
                if stdin.lock().read_line(&mut input)? == 0 {
                    break;
                }
                let Ok(ordinal) = input.trim().parse::<usize>() else {
                    println!("Invalid choice. Please enter a valid number.");
                    continue;
                };
                match session.choose(&current.root.id, ordinal) {
                    Ok(next) => current = next,
                    Err(TopicTreeError::InvalidChoice { .. }) => {
                        println!("Invalid choice. Please enter a valid number.");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }
    Ok(())
}
