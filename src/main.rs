mod commands;
mod config;
mod diagnostics;
mod error;
mod graph;
mod index;
mod metrics;
mod render;
mod reports;
mod scanner;
mod types;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "anchorstat", about = "Anchor granularity analysis for markdown corpora")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and print the three ranked reports
    Analyze {
        /// Emit one JSON object instead of markdown tables
        #[arg(long)]
        json: bool,
        /// Corpus root directory (defaults to the current directory)
        root: Option<PathBuf>,
    },
    /// Build the document reference graph and print it as Graphviz DOT
    Graph {
        /// Write the DOT text to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Corpus root directory (defaults to the current directory)
        root: Option<PathBuf>,
    },
    /// Print the comprehensive reference document
    Info,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { json, root } => {
            commands::analyze(root.as_deref().unwrap_or(Path::new(".")), json)
        },
        Commands::Graph { output, root } => {
            commands::graph(root.as_deref().unwrap_or(Path::new(".")), output.as_deref())
        },
        Commands::Info => {
            commands::info();
            Ok(())
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    }
}
