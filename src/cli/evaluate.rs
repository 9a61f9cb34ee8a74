//! Evaluate command: runs the gate against a local repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::config::IncludePathsConfig;
use crate::gate::{BuildGate, ChangeQuery, Decision, RevisionId, RevisionPair, TracingSink};
use crate::git::{GitChangeSource, GitRepository};

/// Evaluate command options - decides whether a change should build.
#[derive(Parser)]
pub struct EvaluateCommand {
    /// Current revision of the branch head (hash, branch or tag).
    #[arg(value_name = "CURRENT")]
    pub current: String,

    /// Previous revision of the branch head. Omit on the first build of a
    /// head; all history up to CURRENT then counts as new.
    #[arg(value_name = "PREVIOUS")]
    pub previous: Option<String>,

    /// Branch head being evaluated (defaults to the current branch).
    #[arg(long)]
    pub head: Option<String>,

    /// Newline-delimited list of inclusion patterns. Patterns are full
    /// regular expressions matched against the whole path, not globs.
    /// Prefix with @ to read the list from a file. Empty means no
    /// restriction.
    #[arg(long, default_value = "", value_name = "PATTERNS")]
    pub included_paths: String,

    /// Path to the repository (defaults to the current directory).
    #[arg(long)]
    pub repo: Option<PathBuf>,

    /// Output format: text (default), json.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Exit with status 1 when the decision is to skip.
    #[arg(long)]
    pub exit_status: bool,
}

/// Machine-readable evaluation result.
#[derive(Serialize)]
struct EvaluationReport {
    head: String,
    current: String,
    previous: Option<String>,
    decision: Decision,
}

impl EvaluateCommand {
    /// Executes the evaluate command.
    pub fn execute(self) -> Result<()> {
        let repo = match &self.repo {
            Some(path) => GitRepository::open_at(path)?,
            None => GitRepository::open()?,
        };

        let head = match &self.head {
            Some(head) => head.clone(),
            None => repo.current_branch()?,
        };

        // Resolve specs up front; the gate is handed already-resolved
        // revision identifiers.
        let current = repo.resolve_revision(&self.current)?;
        let previous = self
            .previous
            .as_deref()
            .map(|spec| repo.resolve_revision(spec))
            .transpose()?;

        let config = IncludePathsConfig::new(self.load_included_paths()?);
        let query = ChangeQuery {
            head: head.clone(),
            revisions: RevisionPair {
                previous: previous.map(|oid| RevisionId::new(oid.to_string())),
                current: RevisionId::new(current.to_string()),
            },
        };

        let gate = BuildGate::new(config);
        let source = GitChangeSource::new(repo);
        let decision = gate.decide(&source, &query, &mut TracingSink);

        match self.format.as_str() {
            "json" => {
                let report = EvaluationReport {
                    head,
                    current: current.to_string(),
                    previous: query
                        .revisions
                        .previous
                        .as_ref()
                        .map(ToString::to_string),
                    decision,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            _ => {
                if decision.should_build() {
                    println!("build");
                } else {
                    println!("skip");
                }
            }
        }

        if self.exit_status && !decision.should_build() {
            std::process::exit(1);
        }

        Ok(())
    }

    /// Pattern text from the flag, or from a file when prefixed with @.
    fn load_included_paths(&self) -> Result<String> {
        if let Some(path) = self.included_paths.strip_prefix('@') {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read pattern file: {path}"));
        }

        Ok(self.included_paths.clone())
    }
}
