//! Checkers over the markdown body that follows the header.

use std::sync::LazyLock;

use regex::Regex;

use super::{CheckCategory, Checker, Unit};
use crate::report::{Issue, Severity};
use crate::schema::{CORE_WORKFLOW_STEPS, SECTION_ORDER};

static CORE_WORKFLOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##\s*Core\s+Workflow").expect("valid regex"));
static WHEN_TO_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)##\s*When\s+to\s+Use(?:\s+This\s+Skill)?").expect("valid regex")
});
static NUMBERED_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.\s").expect("valid regex"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s").expect("valid regex"));
static NEXT_SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n##\s+").expect("valid regex"));
static H2_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+)$").expect("valid regex"));

/// Text after the first match of `header` up to the next H2, or `None`.
fn section<'a>(body: &'a str, header: &Regex) -> Option<&'a str> {
    let start = header.find(body)?.end();
    let rest = &body[start..];
    let end = NEXT_SECTION.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..end])
}

pub struct CoreWorkflowChecker;

impl Checker for CoreWorkflowChecker {
    fn name(&self) -> &'static str {
        "core-workflow-steps"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };

        let Some(content) = section(&fm.body, &CORE_WORKFLOW) else {
            return vec![unit.issue(
                self.name(),
                Severity::Warning,
                "Missing '## Core Workflow' section",
                &fm.path,
            )];
        };

        let steps = NUMBERED_STEP.find_iter(content).count();
        if steps != CORE_WORKFLOW_STEPS {
            return vec![unit.issue(
                self.name(),
                Severity::Warning,
                format!("Core Workflow has {steps} steps (expected {CORE_WORKFLOW_STEPS})"),
                &fm.path,
            )];
        }
        Vec::new()
    }
}

/// The optional "When to Use" section is mostly bullets.
pub struct WhenToUseChecker;

impl Checker for WhenToUseChecker {
    fn name(&self) -> &'static str {
        "when-to-use-format"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };
        let Some(content) = section(&fm.body, &WHEN_TO_USE) else {
            return Vec::new();
        };

        let content_lines: Vec<&str> = content
            .trim()
            .split('\n')
            .filter(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('#')
            })
            .collect();
        if content_lines.is_empty() {
            return Vec::new();
        }

        let prose = content_lines
            .iter()
            .filter(|line| !BULLET.is_match(line))
            .count();
        if prose > content_lines.len() / 2 {
            return vec![unit.issue(
                self.name(),
                Severity::Warning,
                "'When to Use' section should use bullet list format (- or *)",
                &fm.path,
            )];
        }
        Vec::new()
    }
}

/// Known H2 sections appear in canonical order.
pub struct SectionOrderChecker;

impl Checker for SectionOrderChecker {
    fn name(&self) -> &'static str {
        "section-order"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };

        let found: Vec<(usize, &str)> = H2_HEADER
            .captures_iter(&fm.body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter_map(|title| {
                SECTION_ORDER
                    .iter()
                    .position(|known| *known == title)
                    .map(|rank| (rank, title))
            })
            .collect();

        // First inversion only.
        for pair in found.windows(2) {
            let (current_rank, current) = pair[0];
            let (next_rank, next) = pair[1];
            if current_rank > next_rank {
                return vec![unit.issue(
                    self.name(),
                    Severity::Warning,
                    format!("Section order: '{current}' should come after '{next}'"),
                    &fm.path,
                )];
            }
        }
        Vec::new()
    }
}

/// Non-blank body line count stays inside the configured window.
pub struct LineCountChecker {
    min: usize,
    max: usize,
}

impl LineCountChecker {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Checker for LineCountChecker {
    fn name(&self) -> &'static str {
        "line-count"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Yaml
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let Some(fm) = unit.frontmatter() else {
            return Vec::new();
        };

        let count = fm
            .body
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .count();

        let message = if count < self.min {
            format!("SKILL.md has {count} non-blank lines (minimum {})", self.min)
        } else if count > self.max {
            format!("SKILL.md has {count} non-blank lines (maximum {})", self.max)
        } else {
            return Vec::new();
        };
        vec![unit.issue(self.name(), Severity::Warning, message, &fm.path)]
    }
}
