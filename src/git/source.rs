//! git2-backed change source.

use std::fmt::Write as _;

use git2::{Commit, Delta, Oid, Repository};

use crate::gate::{ChangeQuery, ChangeSource, GateError, RevisionId};
use crate::git::{GitRepository, NATIVE_ID_LEN};

/// Change source that renders the raw changelog stream from a local
/// repository.
///
/// Walks history from the query's current revision, hiding everything
/// reachable from the previous revision, and prints each commit in the raw
/// `whatchanged` shape the changelog parser consumes. Each commit is diffed
/// against its first parent (the empty tree for root commits).
pub struct GitChangeSource {
    repo: GitRepository,
}

impl GitChangeSource {
    /// Creates a change source over an opened repository.
    pub fn new(repo: GitRepository) -> Self {
        Self { repo }
    }

    /// Coerces a generic revision identifier into a native object id.
    ///
    /// Identifiers longer than the native hex length are truncated to their
    /// first 40 characters; native-form identifiers pass through unchanged.
    fn native_id(rev: &RevisionId) -> Result<Oid, GateError> {
        let raw = rev.as_str();
        let native = if raw.len() > NATIVE_ID_LEN {
            // str::get refuses a cut inside a multi-byte character; such an
            // identifier cannot be a hex object id anyway.
            raw.get(..NATIVE_ID_LEN).ok_or_else(|| {
                GateError::Backend(format!("invalid revision id {raw:?}: not a hex object id"))
            })?
        } else {
            raw
        };

        Oid::from_str(native)
            .map_err(|e| GateError::Backend(format!("invalid revision id {raw:?}: {e}")))
    }
}

impl ChangeSource for GitChangeSource {
    fn changes_between(&self, query: &ChangeQuery) -> Result<Vec<u8>, GateError> {
        let repo = self.repo.repository();

        let current = Self::native_id(&query.revisions.current)?;
        // A current revision the repository does not know about means no
        // file-level view exists for this head.
        let current_commit = repo
            .find_commit(current)
            .map_err(|_| GateError::BackendUnavailable {
                head: query.head.clone(),
            })?;

        let mut walk = repo.revwalk().map_err(backend)?;
        walk.push(current_commit.id()).map_err(backend)?;
        if let Some(previous) = &query.revisions.previous {
            walk.hide(Self::native_id(previous)?).map_err(backend)?;
        }

        let mut out = String::new();
        for oid in walk {
            let oid = oid.map_err(backend)?;
            let commit = repo.find_commit(oid).map_err(backend)?;
            render_commit(repo, &commit, &mut out)?;
        }

        Ok(out.into_bytes())
    }
}

/// Renders one commit as a raw changelog record.
fn render_commit(repo: &Repository, commit: &Commit, out: &mut String) -> Result<(), GateError> {
    let tree = commit.tree().map_err(backend)?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(
            commit
                .parent(0)
                .and_then(|parent| parent.tree())
                .map_err(backend)?,
        )
    } else {
        None
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .map_err(backend)?;

    let _ = writeln!(out, "commit {}", commit.id());

    let mut render_error = None;
    diff.foreach(
        &mut |delta, _progress| {
            let status = match delta.status() {
                Delta::Added => 'A',
                Delta::Deleted => 'D',
                Delta::Modified => 'M',
                Delta::Renamed => 'R',
                Delta::Copied => 'C',
                Delta::Typechange => 'T',
                _ => 'X',
            };

            // Deleted files only carry an old path; everything else reports
            // the new path.
            let file = if delta.status() == Delta::Deleted {
                delta.old_file()
            } else {
                delta.new_file()
            };

            if let Some(path) = file.path().and_then(|p| p.to_str()) {
                let _ = writeln!(
                    out,
                    ":{:06o} {:06o} {} {} {status}\t{path}",
                    i32::from(delta.old_file().mode()),
                    i32::from(delta.new_file().mode()),
                    delta.old_file().id(),
                    delta.new_file().id(),
                );
            } else {
                render_error = Some(GateError::Backend(
                    "changed path is not valid UTF-8".to_string(),
                ));
            }

            true
        },
        None,
        None,
        None,
    )
    .map_err(backend)?;

    match render_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn backend(err: git2::Error) -> GateError {
    GateError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_id_passes_through_full_length_ids() {
        let id = "59b1b3622654d3ecc9f8c5f9269ea2757a0e9112";
        assert_eq!(
            GitChangeSource::native_id(&RevisionId::new(id)).unwrap(),
            Oid::from_str(id).unwrap()
        );
    }

    #[test]
    fn native_id_truncates_long_identifiers() {
        let id = "59b1b3622654d3ecc9f8c5f9269ea2757a0e9112";
        let decorated = format!("{id}extra-encoding-suffix");
        assert_eq!(
            GitChangeSource::native_id(&RevisionId::new(decorated)).unwrap(),
            Oid::from_str(id).unwrap()
        );
    }

    #[test]
    fn native_id_rejects_non_hex() {
        assert!(GitChangeSource::native_id(&RevisionId::new("not-a-revision")).is_err());
    }

    #[test]
    fn native_id_rejects_multibyte_straddling_the_cut() {
        // Byte 40 falls inside the two-byte 'é'; truncation must error, not
        // panic on a mid-character slice.
        let decorated = format!("{}é abc", "a".repeat(39));
        assert!(GitChangeSource::native_id(&RevisionId::new(decorated)).is_err());
    }
}
