//! Raw changelog stream parsing.
//!
//! The change source emits the `git whatchanged` raw format: a `commit
//! <hex>` header opens each record, followed by metadata, the message, and
//! raw diff lines of the form `:oldmode newmode oldid newid STATUS\tpath`.
//! Only the header and the raw diff lines matter here; everything else is
//! skipped.

use serde::Serialize;

/// One commit's entry in a raw changelog stream.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeSetRecord {
    /// Commit id as printed on the `commit` header line.
    pub commit_id: String,
    /// Paths touched by this commit, in stream order.
    pub affected_paths: Vec<String>,
}

/// Parses a raw changelog stream into an ordered sequence of records.
///
/// Rename and copy diff lines carry two tab-separated paths; both sides are
/// recorded. Content that is not a changelog yields no records; the caller
/// treats that the same as no changes.
pub fn parse(raw: &[u8]) -> Vec<ChangeSetRecord> {
    let text = String::from_utf8_lossy(raw);
    let mut records = Vec::new();
    let mut current: Option<ChangeSetRecord> = None;

    for line in text.lines() {
        if let Some(id) = commit_header(line) {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(ChangeSetRecord {
                commit_id: id.to_string(),
                affected_paths: Vec::new(),
            });
        } else if line.starts_with(':') {
            if let Some(record) = current.as_mut() {
                record
                    .affected_paths
                    .extend(raw_diff_paths(line).map(str::to_string));
            }
        }
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    records
}

/// Commit id from a `commit <hex>` header line, if this is one.
fn commit_header(line: &str) -> Option<&str> {
    let id = line.strip_prefix("commit ")?;
    let is_object_id =
        (7..=64).contains(&id.len()) && id.bytes().all(|b| b.is_ascii_hexdigit());
    is_object_id.then_some(id)
}

/// Path fields of a raw diff line: everything after the first tab.
fn raw_diff_paths(line: &str) -> impl Iterator<Item = &str> {
    line.split('\t').skip(1).filter(|path| !path.is_empty())
}
