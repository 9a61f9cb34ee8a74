//! # branch-gate
//!
//! Decides whether a source-control change event should trigger an
//! automatic build, based on whether any file touched between two
//! revisions of a branch head matches a configured list of path patterns.
//!
//! ## Quick Start
//!
//! ```rust
//! use branch_gate::config::IncludePathsConfig;
//! use branch_gate::gate::BuildGate;
//!
//! let gate = BuildGate::new(IncludePathsConfig::new("src/.*\\.rs"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod gate;
pub mod git;

pub use crate::cli::Cli;

/// The current version of branch-gate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
