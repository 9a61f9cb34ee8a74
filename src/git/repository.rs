//! Git repository operations

use anyhow::{Context, Result};
use git2::{Oid, Repository};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open repository at current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::open(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Open repository at specified path
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Get access to the underlying git2::Repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Get current branch name
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;

        if let Some(name) = head.shorthand() {
            if name != "HEAD" {
                return Ok(name.to_string());
            }
        }

        anyhow::bail!("Repository is in detached HEAD state")
    }

    /// Resolve a revision spec (branch, tag, hash) to a full commit id
    pub fn resolve_revision(&self, spec: &str) -> Result<Oid> {
        let obj = self
            .repo
            .revparse_single(spec)
            .with_context(|| format!("Failed to parse revision: {spec}"))?;
        let commit = obj
            .peel_to_commit()
            .with_context(|| format!("Revision is not a commit: {spec}"))?;

        Ok(commit.id())
    }
}
