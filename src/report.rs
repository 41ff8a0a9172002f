//! Issue and report types collected by a validation run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Blocking (`Error`) or advisory (`Warning`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
///
/// `unit` is the skill directory name for rule-checker issues, and a scope
/// label (`__workflow__`, `__manifest__`, `__orphans__`, `__counts__`, or a
/// record's relative path) everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "skill")]
    pub unit: String,
    pub check: String,
    pub severity: Severity,
    pub message: String,
    pub file: Option<String>,
}

impl Issue {
    pub fn new(
        unit: impl Into<String>,
        check: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            check: check.into(),
            severity,
            message: message.into(),
            file: None,
        }
    }

    pub fn error(
        unit: impl Into<String>,
        check: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(unit, check, Severity::Error, message)
    }

    pub fn warning(
        unit: impl Into<String>,
        check: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(unit, check, Severity::Warning, message)
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// All issues found for one skill directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitResult {
    pub unit: String,
    pub issues: Vec<Issue>,
}

impl UnitResult {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|issue| !issue.is_error())
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub results: Vec<UnitResult>,
    pub count_issues: Vec<Issue>,
    pub workflow_issues: Vec<Issue>,
}

impl ValidationReport {
    fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.results
            .iter()
            .flat_map(|result| result.issues.iter())
            .chain(self.count_issues.iter())
            .chain(self.workflow_issues.iter())
    }

    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.all_issues().filter(|issue| issue.is_error()).count()
    }

    #[must_use]
    pub fn total_warnings(&self) -> usize {
        self.all_issues().filter(|issue| !issue.is_error()).count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.all_issues().any(Issue::is_error)
    }

    /// Serializable view with derived flags and the summary block.
    #[must_use]
    pub fn to_json_view(&self) -> ReportJson<'_> {
        ReportJson {
            results: self
                .results
                .iter()
                .map(|result| UnitResultJson {
                    skill: &result.unit,
                    issues: &result.issues,
                    has_errors: result.has_errors(),
                    has_warnings: result.has_warnings(),
                })
                .collect(),
            count_issues: &self.count_issues,
            workflow_issues: &self.workflow_issues,
            summary: Summary {
                total_skills: self.results.len(),
                total_errors: self.total_errors(),
                total_warnings: self.total_warnings(),
                has_errors: self.has_errors(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    pub results: Vec<UnitResultJson<'a>>,
    pub count_issues: &'a [Issue],
    pub workflow_issues: &'a [Issue],
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct UnitResultJson<'a> {
    pub skill: &'a str,
    pub issues: &'a [Issue],
    pub has_errors: bool,
    pub has_warnings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_skills: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub has_errors: bool,
}
