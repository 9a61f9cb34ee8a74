//! Build gate decision policy.
//!
//! The gate is a single-shot, stateless evaluation: given a pattern
//! configuration and a change query, it answers "should an automatic build
//! run?". The policy is fail-open: any internal failure resolves to
//! building, since silently skipping a build is the worse failure mode.

pub mod error;
pub mod matcher;
pub mod resolver;

use serde::Serialize;

use crate::config::IncludePathsConfig;

pub use error::GateError;
pub use resolver::{
    AffectedPathSet, ChangeQuery, ChangeSetResolver, ChangeSource, RevisionId, RevisionPair,
};

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Proceed with the automatic build.
    Build,
    /// Skip the automatic build.
    Skip,
}

impl Decision {
    /// Whether the decision is to build.
    pub fn should_build(self) -> bool {
        matches!(self, Self::Build)
    }
}

/// Side channel for human-readable diagnostic messages.
///
/// Carries error descriptions to whoever is watching the evaluation; never
/// used for control flow.
pub trait DiagnosticSink {
    /// Reports an error-severity condition.
    fn error(&mut self, message: &str);
}

/// Diagnostic sink that forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&mut self, message: &str) {
        tracing::error!("{message}");
    }
}

/// The path-inclusion build gate.
pub struct BuildGate {
    config: IncludePathsConfig,
}

impl BuildGate {
    /// Creates a gate for the given pattern configuration.
    pub fn new(config: IncludePathsConfig) -> Self {
        Self { config }
    }

    /// Decides whether the change between the query's revisions should
    /// trigger a build.
    ///
    /// Ordered policy:
    /// 1. No restriction configured: build.
    /// 2. Change source unavailable: diagnostic, build.
    /// 3. Any other evaluation error (backend failure, bad pattern syntax):
    ///    diagnostic, build.
    /// 4. No affected paths: build.
    /// 5. Otherwise build iff any affected path matches any pattern.
    ///
    /// This call never errors; rows 2 and 3 recover by building.
    pub fn decide(
        &self,
        source: &dyn ChangeSource,
        query: &ChangeQuery,
        sink: &mut dyn DiagnosticSink,
    ) -> Decision {
        if self.config.is_unrestricted() {
            tracing::debug!("no inclusion patterns configured, building");
            return Decision::Build;
        }

        match self.evaluate(source, query) {
            Ok(decision) => decision,
            Err(GateError::BackendUnavailable { head }) => {
                sink.error(&format!(
                    "change source unavailable for {head:?}, building anyway"
                ));
                Decision::Build
            }
            Err(err) => {
                sink.error(&format!("gate evaluation failed ({err}), building anyway"));
                Decision::Build
            }
        }
    }

    /// Policy rows 3 through 5: resolve the affected set, apply the
    /// empty-set rule, then match paths against patterns.
    fn evaluate(
        &self,
        source: &dyn ChangeSource,
        query: &ChangeQuery,
    ) -> Result<Decision, GateError> {
        let patterns = self.config.patterns()?;
        let affected = ChangeSetResolver::resolve(source, query)?;
        tracing::debug!(
            head = %query.head,
            paths = affected.len(),
            patterns = patterns.len(),
            "resolved affected paths"
        );

        if affected.is_empty() {
            return Ok(Decision::Build);
        }

        let included = affected
            .iter()
            .any(|path| matcher::is_included(path, &patterns));

        Ok(if included {
            Decision::Build
        } else {
            Decision::Skip
        })
    }
}
