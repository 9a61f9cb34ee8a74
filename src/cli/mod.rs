//! CLI interface for branch-gate

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod evaluate;

/// branch-gate: decides whether branch head changes should trigger a build
#[derive(Parser)]
#[command(name = "branch-gate")]
#[command(
    about = "A path-based gate deciding whether branch head changes should trigger a build",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate whether a change between two revisions should build
    Evaluate(evaluate::EvaluateCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Evaluate(evaluate_cmd) => evaluate_cmd.execute(),
        }
    }
}
