//! Checkers over the parsed `SKILL.md` header.

use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::Regex;

use super::{CheckCategory, Checker, Unit};
use crate::frontmatter::{ExtractError, Value};
use crate::report::{Issue, Severity};
use crate::schema::{
    DESCRIPTION_PREFIX, Domain, REQUIRED_FIELDS, REQUIRED_METADATA_FIELDS, Vocabulary,
};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("valid regex"));

/// The document exists, is delimited and its header parses.
pub struct YamlChecker;

impl Checker for YamlChecker {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Err(err) = unit.extraction() else {
            return Vec::new();
        };

        let message = match err {
            ExtractError::Missing => "Missing SKILL.md file".to_string(),
            ExtractError::Unreadable(reason) => format!("Cannot read SKILL.md: {reason}"),
            ExtractError::NoOpeningDelimiter => {
                "SKILL.md does not start with YAML frontmatter (---)".to_string()
            }
            ExtractError::NoClosingDelimiter => {
                "Invalid YAML frontmatter structure (missing closing ---)".to_string()
            }
            ExtractError::Parse(parse) => format!("YAML parsing error: {parse}"),
        };

        vec![unit.issue(
            self.name(),
            Severity::Error,
            message,
            &unit.document_path(),
        )]
    }
}

pub struct RequiredFieldsChecker;

impl Checker for RequiredFieldsChecker {
    fn name(&self) -> &'static str {
        "required-fields"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };

        REQUIRED_FIELDS
            .iter()
            .filter(|field| !fm.header.contains_key(field))
            .map(|field| {
                unit.issue(
                    self.name(),
                    Severity::Error,
                    format!("Missing required field: {field}"),
                    &fm.path,
                )
            })
            .collect()
    }
}

/// Shape and content of the `metadata` block.
pub struct MetadataFieldsChecker;

impl Checker for MetadataFieldsChecker {
    fn name(&self) -> &'static str {
        "metadata-fields"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };
        let issue = |severity, message: String| unit.issue(self.name(), severity, message, &fm.path);

        let Some(metadata) = fm.header.get_present("metadata") else {
            return vec![issue(Severity::Error, "Missing 'metadata' key".to_string())];
        };
        let Some(metadata) = metadata.as_map() else {
            return vec![issue(
                Severity::Error,
                "'metadata' must be a mapping".to_string(),
            )];
        };

        let mut issues: Vec<Issue> = REQUIRED_METADATA_FIELDS
            .iter()
            .filter(|field| !metadata.contains_key(field))
            .map(|field| {
                issue(
                    Severity::Error,
                    format!("Missing required metadata field: {field}"),
                )
            })
            .collect();

        if let Some(triggers) = metadata.get_present("triggers") {
            let usable = triggers.as_str().is_some_and(|s| !s.trim().is_empty());
            if !usable {
                issues.push(issue(
                    Severity::Error,
                    "'metadata.triggers' must be a non-empty string".to_string(),
                ));
            }
        }

        if let Some(domain) = metadata.get_present("domain") {
            let known = domain.as_str().and_then(Domain::parse).is_some();
            if !known {
                issues.push(issue(
                    Severity::Warning,
                    format!("Unknown domain: '{domain}'. Known: {}", Domain::expected()),
                ));
            }
        }

        if let Some(related) = metadata.get("related-skills") {
            match related {
                Value::Null => issues.push(issue(
                    Severity::Warning,
                    "'metadata.related-skills' is empty".to_string(),
                )),
                Value::String(s) if s.trim().is_empty() => issues.push(issue(
                    Severity::Warning,
                    "'metadata.related-skills' is empty".to_string(),
                )),
                Value::String(s) => {
                    let skills_dir = unit.path().parent().unwrap_or_else(|| unit.path());
                    for reference in s.split(',').map(str::trim).filter(|r| !r.is_empty()) {
                        if !skills_dir.join(reference).is_dir() {
                            issues.push(issue(
                                Severity::Warning,
                                format!(
                                    "'metadata.related-skills' references non-existent skill: '{reference}'"
                                ),
                            ));
                        }
                    }
                }
                _ => issues.push(issue(
                    Severity::Error,
                    "'metadata.related-skills' must be a string".to_string(),
                )),
            }
        }

        issues
    }
}

/// Name matches the identifier pattern and the directory name.
pub struct NameFormatChecker;

impl Checker for NameFormatChecker {
    fn name(&self) -> &'static str {
        "name-format"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };
        let Some(value) = fm.header.get_present("name") else {
            return Vec::new();
        };

        let Some(name) = value.scalar_text() else {
            return vec![unit.issue(
                self.name(),
                Severity::Error,
                format!("Invalid name format: expected a string, found {}", value.type_name()),
                &fm.path,
            )];
        };
        if name.is_empty() {
            return Vec::new();
        }

        let mut issues = Vec::new();
        if !NAME_PATTERN.is_match(&name) {
            issues.push(unit.issue(
                self.name(),
                Severity::Error,
                format!("Invalid name format: '{name}'. Use only letters, numbers, and hyphens."),
                &fm.path,
            ));
        }
        if name != unit.id() {
            issues.push(unit.issue(
                self.name(),
                Severity::Warning,
                format!(
                    "Directory name '{}' doesn't match skill name '{name}'",
                    unit.id()
                ),
                &fm.path,
            ));
        }
        issues
    }
}

pub struct DescriptionLengthChecker {
    max_chars: usize,
}

impl DescriptionLengthChecker {
    #[must_use]
    pub const fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Checker for DescriptionLengthChecker {
    fn name(&self) -> &'static str {
        "description-length"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };
        let Some(description) = fm.header.get("description").and_then(Value::as_str) else {
            return Vec::new();
        };

        let length = description.chars().count();
        if length > self.max_chars {
            return vec![unit.issue(
                self.name(),
                Severity::Warning,
                format!(
                    "Description exceeds {} chars ({length} chars)",
                    self.max_chars
                ),
                &fm.path,
            )];
        }
        Vec::new()
    }
}

pub struct DescriptionFormatChecker;

impl Checker for DescriptionFormatChecker {
    fn name(&self) -> &'static str {
        "description-format"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };
        let Some(description) = fm.header.get("description").and_then(Value::as_str) else {
            return Vec::new();
        };

        if !description.is_empty() && !description.starts_with(DESCRIPTION_PREFIX) {
            return vec![unit.issue(
                self.name(),
                Severity::Warning,
                format!("Description should start with '{DESCRIPTION_PREFIX}' (trigger-only format)"),
                &fm.path,
            )];
        }
        Vec::new()
    }
}

/// A `metadata` field, when present, is a member of vocabulary `V`.
pub struct MetadataEnumChecker<V> {
    name: &'static str,
    field: &'static str,
    vocabulary: PhantomData<fn() -> V>,
}

impl<V: Vocabulary> MetadataEnumChecker<V> {
    #[must_use]
    pub const fn new(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            field,
            vocabulary: PhantomData,
        }
    }
}

impl<V: Vocabulary> Checker for MetadataEnumChecker<V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };
        let Some(metadata) = fm.header.get_present("metadata").and_then(Value::as_map) else {
            return Vec::new();
        };
        let Some(value) = metadata.get_present(self.field) else {
            return Vec::new();
        };

        if value.as_str().and_then(V::parse).is_none() {
            return vec![unit.issue(
                self.name,
                Severity::Warning,
                format!(
                    "Unknown {}: '{value}'. Expected: {}",
                    self.field,
                    V::expected()
                ),
                &fm.path,
            )];
        }
        Vec::new()
    }
}
