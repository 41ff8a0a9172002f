//! Header extraction and structured-data parsing.
//!
//! A skill document starts with a `---` delimited header. [`split`] cuts the
//! document into header text and body; [`HeaderParser`] turns header text
//! (or a whole workflow record) into a [`Mapping`].

mod fallback;
mod value;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FrontmatterError, Result, SkillcheckError};
use crate::schema::FRONTMATTER_DELIMITER;

pub use fallback::parse as parse_fallback;
pub use value::{Mapping, Value};

/// Parser requested by the user or config.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParserChoice {
    /// Full YAML when compiled in, otherwise the restricted grammar.
    #[default]
    Auto,
    /// Full YAML; an error when the `yaml` feature is disabled.
    Full,
    /// Restricted grammar only.
    Fallback,
}

impl ParserChoice {
    /// Parse a config or environment value.
    pub fn from_name(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "full" | "yaml" => Ok(Self::Full),
            "fallback" | "simple" => Ok(Self::Fallback),
            other => Err(SkillcheckError::Config(format!(
                "invalid parser {other} (expected auto|full|fallback)"
            ))),
        }
    }
}

/// The parser actually used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderParser {
    /// `serde_yaml`, converted into [`Value`].
    #[cfg(feature = "yaml")]
    Full,
    /// The restricted grammar in [`parse_fallback`].
    Fallback,
}

impl HeaderParser {
    /// Resolve a choice against what was compiled in.
    pub fn resolve(choice: ParserChoice) -> Result<Self> {
        match choice {
            #[cfg(feature = "yaml")]
            ParserChoice::Auto | ParserChoice::Full => Ok(Self::Full),
            #[cfg(not(feature = "yaml"))]
            ParserChoice::Auto => Ok(Self::Fallback),
            #[cfg(not(feature = "yaml"))]
            ParserChoice::Full => Err(SkillcheckError::Config(
                "parser 'full' requires the `yaml` feature".to_string(),
            )),
            ParserChoice::Fallback => Ok(Self::Fallback),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "yaml")]
            Self::Full => "full",
            Self::Fallback => "fallback",
        }
    }

    /// Parse structured text into a mapping.
    ///
    /// An empty document is an empty mapping. A document whose top level is
    /// a list or scalar is rejected.
    pub fn parse(self, text: &str) -> std::result::Result<Mapping, FrontmatterError> {
        match self {
            #[cfg(feature = "yaml")]
            Self::Full => {
                let raw: serde_yaml::Value = serde_yaml::from_str(text)
                    .map_err(|err| FrontmatterError::Syntax(err.to_string()))?;
                match Value::from(raw) {
                    Value::Null => Ok(Mapping::new()),
                    Value::Map(map) => Ok(map),
                    other => Err(FrontmatterError::NotAMapping(other.type_name())),
                }
            }
            Self::Fallback => Ok(parse_fallback(text)),
        }
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        #[cfg(feature = "yaml")]
        {
            Self::Full
        }
        #[cfg(not(feature = "yaml"))]
        {
            Self::Fallback
        }
    }
}

/// Why a skill document has no usable header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document file does not exist.
    Missing,
    /// The document exists but could not be read as text.
    Unreadable(String),
    /// The content does not begin with the delimiter.
    NoOpeningDelimiter,
    /// Fewer than two delimiters.
    NoClosingDelimiter,
    /// The header text failed to parse.
    Parse(FrontmatterError),
}

/// A skill document split into parsed header and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub header: Mapping,
    pub body: String,
    pub path: PathBuf,
}

/// Split content into `(header_text, body)`.
///
/// Content must start with the delimiter, and splitting on it (at most three
/// parts) must produce three parts. The body keeps everything after the
/// second delimiter, including later delimiters.
pub fn split(content: &str) -> std::result::Result<(&str, &str), ExtractError> {
    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return Err(ExtractError::NoOpeningDelimiter);
    }
    let mut parts = content.splitn(3, FRONTMATTER_DELIMITER);
    let _leading = parts.next();
    match (parts.next(), parts.next()) {
        (Some(header), Some(body)) => Ok((header, body)),
        _ => Err(ExtractError::NoClosingDelimiter),
    }
}

/// Read, split and parse the document at `path`.
pub fn extract(
    path: &Path,
    parser: HeaderParser,
) -> std::result::Result<Frontmatter, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::Missing);
    }
    let content =
        std::fs::read_to_string(path).map_err(|err| ExtractError::Unreadable(err.to_string()))?;
    let (header_text, body) = split(&content)?;
    let header = parser.parse(header_text).map_err(ExtractError::Parse)?;
    Ok(Frontmatter {
        header,
        body: body.to_string(),
        path: path.to_path_buf(),
    })
}
