//! Affected-path resolution through an injected change source.

use std::collections::HashSet;
use std::fmt;

use crate::gate::GateError;
use crate::git::changelog;

/// Opaque revision identifier.
///
/// The gate never interprets the identifier; backends coerce it into their
/// native form when querying history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionId(String);

impl RevisionId {
    /// Creates a revision identifier from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Previous and current revisions of one branch head.
///
/// `previous` is absent on the first build of a head: no prior point of
/// comparison exists, so all history up to `current` counts as new.
#[derive(Debug, Clone)]
pub struct RevisionPair {
    /// Revision the head pointed at before the change, if any.
    pub previous: Option<RevisionId>,
    /// Revision the head points at now.
    pub current: RevisionId,
}

/// One change evaluation request: which head moved and between which revisions.
#[derive(Debug, Clone)]
pub struct ChangeQuery {
    /// Branch head being evaluated.
    pub head: String,
    /// Revisions to compare.
    pub revisions: RevisionPair,
}

/// Unordered set of file paths touched between two revisions.
///
/// Built fresh for every evaluation and discarded at its end; never
/// persisted across calls.
#[derive(Debug, Clone, Default)]
pub struct AffectedPathSet {
    paths: HashSet<String>,
}

impl AffectedPathSet {
    /// Adds a path to the set.
    pub fn insert(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    /// Whether no paths were affected.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of distinct affected paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set contains the given path.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Iterates over the affected paths in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl FromIterator<String> for AffectedPathSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Capability to produce the raw changelog stream between two revisions.
///
/// This is the injected seam to the version-control backend: the gate stays
/// independent of any concrete backend, and tests substitute an in-memory
/// source.
pub trait ChangeSource {
    /// Raw changelog bytes for all commits after `previous` up to `current`.
    ///
    /// When `previous` is absent, the stream covers all history up to
    /// `current`. Signals [`GateError::BackendUnavailable`] when no
    /// file-level view exists for the query.
    fn changes_between(&self, query: &ChangeQuery) -> Result<Vec<u8>, GateError>;
}

/// Resolves the affected-path set for a change query.
pub struct ChangeSetResolver;

impl ChangeSetResolver {
    /// Flattens every change-set record between the two revisions into one
    /// unordered path set.
    ///
    /// An empty or unparseable stream resolves to an empty set; refusing to
    /// parse is not an error at this layer.
    pub fn resolve(
        source: &dyn ChangeSource,
        query: &ChangeQuery,
    ) -> Result<AffectedPathSet, GateError> {
        let raw = source.changes_between(query)?;
        let records = changelog::parse(&raw);

        Ok(records
            .into_iter()
            .flat_map(|record| record.affected_paths)
            .collect())
    }
}
