//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Unit (skill directory) errors
//! - 3xx: Config errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for run-level failures.
///
/// Each variant maps to a numeric code (e.g., `UnitNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// E101: Requested skill directory does not exist
    UnitNotFound,
    /// E102: Units directory itself is missing
    UnitsDirMissing,

    /// E302: Config file has invalid syntax or values
    ConfigInvalid,

    /// E601: Failed to read from the file tree
    StorageReadError,
    /// E605: Serialization/deserialization failed
    SerializationError,

    /// E801: Header or record could not be parsed
    ParseFailed,
}

impl ErrorCode {
    /// Numeric form of the code.
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::UnitNotFound => 101,
            Self::UnitsDirMissing => 102,
            Self::ConfigInvalid => 302,
            Self::StorageReadError => 601,
            Self::SerializationError => 605,
            Self::ParseFailed => 801,
        }
    }

    /// Code formatted as `E<numeric>`.
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Short recovery hint shown next to the error.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::UnitNotFound => "Check the --skill value against the directory names under the skills directory",
            Self::UnitsDirMissing => "Run from the project root or pass --skills-dir",
            Self::ConfigInvalid => "Fix the syntax in skillcheck.toml or the SKILLCHECK_* environment variables",
            Self::StorageReadError => "Check file permissions and that the path exists",
            Self::SerializationError => "Report this output bug with the command that produced it",
            Self::ParseFailed => "Check the YAML syntax of the reported file",
        }
    }

    /// Category label used in machine output.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::UnitNotFound | Self::UnitsDirMissing => "skill",
            Self::ConfigInvalid => "config",
            Self::StorageReadError | Self::SerializationError => "storage",
            Self::ParseFailed => "validation",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
