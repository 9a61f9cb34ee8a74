//! Gate-specific error handling.

use thiserror::Error;

/// Errors raised while resolving changes or matching paths.
///
/// None of these escape [`BuildGate::decide`](crate::gate::BuildGate::decide):
/// the gate policy recovers every variant by building.
#[derive(Error, Debug)]
pub enum GateError {
    /// The change source cannot provide a file-level view for this query.
    #[error("change source cannot provide a changelog view for {head:?}")]
    BackendUnavailable {
        /// Branch head the query was evaluated for.
        head: String,
    },

    /// A configured inclusion pattern is not valid regular-expression syntax.
    #[error("invalid inclusion pattern {pattern:?}: {source}")]
    InvalidPatternSyntax {
        /// Pattern text after trimming and lower-casing.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The change source failed while producing the changelog stream.
    #[error("change source failed: {0}")]
    Backend(String),
}
