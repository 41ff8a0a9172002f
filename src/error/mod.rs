//! Error handling for skillcheck.
//!
//! Only run-level failures are errors. Anything wrong inside a single skill
//! directory or workflow record is reported as an [`Issue`](crate::report::Issue)
//! instead, so one broken file never stops the rest of the run.

mod codes;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for skillcheck operations.
#[derive(Error, Debug)]
pub enum SkillcheckError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Skills directory not found: {}", .0.display())]
    UnitsDirNotFound(PathBuf),

    #[error("Skill not found: {0}")]
    UnitNotFound(String),

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] FrontmatterError),
}

impl SkillcheckError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::StorageReadError,
            Self::UnitsDirNotFound(_) => ErrorCode::UnitsDirMissing,
            Self::UnitNotFound(_) => ErrorCode::UnitNotFound,
            Self::PathNotFound(_) => ErrorCode::StorageReadError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Parse(_) => ErrorCode::ParseFailed,
        }
    }
}

/// Failure of the structured-data parser behind a header or record.
///
/// The restricted fallback grammar never fails; these come from the full
/// YAML parser or from a document whose top level is not a mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("{0}")]
    Syntax(String),

    #[error("top-level value must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Result type alias using `SkillcheckError`.
pub type Result<T> = std::result::Result<T, SkillcheckError>;
