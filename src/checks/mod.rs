//! Per-skill rule checkers.
//!
//! Each checker inspects one skill directory and returns zero or more
//! [`Issue`]s. Checkers never fail: a missing or malformed document either
//! becomes an issue (the `yaml` checker) or makes the other header and body
//! checkers return nothing.

mod body;
mod header;
mod references;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::LimitsConfig;
use crate::frontmatter::{self, ExtractError, Frontmatter, HeaderParser};
use crate::report::{Issue, Severity};
use crate::schema::{SKILL_FILE, Scope, SkillOutputFormat};

pub use body::{CoreWorkflowChecker, LineCountChecker, SectionOrderChecker, WhenToUseChecker};
pub use header::{
    DescriptionFormatChecker, DescriptionLengthChecker, MetadataEnumChecker,
    MetadataFieldsChecker, NameFormatChecker, RequiredFieldsChecker, YamlChecker,
};
pub use references::{NonStandardHeadersChecker, ReferenceCountChecker, ReferencesDirChecker};

/// Group a checker belongs to, used by `--check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    Yaml,
    References,
}

impl CheckCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::References => "references",
        }
    }
}

/// One skill directory under inspection.
///
/// The header document is read and parsed at most once, on first use, and
/// shared by every checker that asks for it.
pub struct Unit {
    id: String,
    path: PathBuf,
    parser: HeaderParser,
    extraction: OnceCell<Result<Frontmatter, ExtractError>>,
}

impl Unit {
    pub fn new(path: impl Into<PathBuf>, id: impl Into<String>, parser: HeaderParser) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            parser,
            extraction: OnceCell::new(),
        }
    }

    /// Directory name of the skill.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.path.join(SKILL_FILE)
    }

    /// Result of reading, splitting and parsing `SKILL.md`.
    pub fn extraction(&self) -> &Result<Frontmatter, ExtractError> {
        self.extraction
            .get_or_init(|| frontmatter::extract(&self.document_path(), self.parser))
    }

    /// The parsed document, or `None` when it is not extractable.
    pub fn frontmatter(&self) -> Option<&Frontmatter> {
        self.extraction().as_ref().ok()
    }

    /// Issue scoped to this unit, pointing at `file`.
    pub fn issue(
        &self,
        check: &str,
        severity: Severity,
        message: impl Into<String>,
        file: &Path,
    ) -> Issue {
        Issue::new(&self.id, check, severity, message).with_file(file.display().to_string())
    }
}

/// A single rule over one skill directory.
pub trait Checker: Send + Sync {
    /// Stable name shown in reports.
    fn name(&self) -> &'static str;

    fn category(&self) -> CheckCategory;

    fn check(&self, unit: &Unit) -> Vec<Issue>;
}

/// Every rule checker, in reporting order.
#[must_use]
pub fn registry(limits: &LimitsConfig) -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(YamlChecker),
        Box::new(RequiredFieldsChecker),
        Box::new(MetadataFieldsChecker),
        Box::new(NameFormatChecker),
        Box::new(DescriptionLengthChecker::new(limits.max_description_chars)),
        Box::new(DescriptionFormatChecker),
        Box::new(MetadataEnumChecker::<Scope>::new("scope-enum", "scope")),
        Box::new(MetadataEnumChecker::<SkillOutputFormat>::new(
            "output-format-enum",
            "output-format",
        )),
        Box::new(CoreWorkflowChecker),
        Box::new(WhenToUseChecker),
        Box::new(SectionOrderChecker),
        Box::new(LineCountChecker::new(
            limits.min_body_lines,
            limits.max_body_lines,
        )),
        Box::new(ReferencesDirChecker),
        Box::new(ReferenceCountChecker),
        Box::new(NonStandardHeadersChecker::new(limits.marker_scan_lines)),
    ]
}

/// Registry restricted to one category, order preserved.
#[must_use]
pub fn registry_for(limits: &LimitsConfig, category: Option<CheckCategory>) -> Vec<Box<dyn Checker>> {
    registry(limits)
        .into_iter()
        .filter(|checker| category.is_none_or(|wanted| checker.category() == wanted))
        .collect()
}

/// Run checkers in order over one unit, concatenating their issues.
pub fn run_checkers(checkers: &[Box<dyn Checker>], unit: &Unit) -> Vec<Issue> {
    let mut issues = Vec::new();
    for checker in checkers {
        let found = checker.check(unit);
        tracing::trace!(
            unit = unit.id(),
            check = checker.name(),
            issues = found.len(),
            "checker finished"
        );
        issues.extend(found);
    }
    issues
}
