pub mod checks;
pub mod cli;
pub mod config;
pub mod counts;
pub mod error;
pub mod frontmatter;
pub mod markdown;
pub mod report;
pub mod schema;
pub mod test_utils;
pub mod validator;
pub mod workflow;

pub use error::{Result, SkillcheckError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
