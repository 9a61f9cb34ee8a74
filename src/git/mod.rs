//! Git backend: repository access, changelog rendering and parsing.

pub mod changelog;
pub mod repository;
pub mod source;

pub use changelog::ChangeSetRecord;
pub use repository::GitRepository;
pub use source::GitChangeSource;

/// Number of hex characters in a native git object id.
pub const NATIVE_ID_LEN: usize = 40;
