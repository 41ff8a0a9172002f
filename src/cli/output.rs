use clap::ValueEnum;
use colored::Colorize;

use crate::error::Result;
use crate::report::{Issue, Severity, ValidationReport};

const RULE_WIDTH: usize = 80;

/// Output format for `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ReportFormat {
    /// Human-readable report (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Output format for `markdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum MarkdownFormat {
    /// Issues grouped by kind (default)
    #[default]
    Text,
    /// JSON array of issues
    Json,
}

fn icon(severity: Severity, color: bool) -> String {
    match (severity, color) {
        (Severity::Error, false) => "ERROR".to_string(),
        (Severity::Warning, false) => "WARN ".to_string(),
        (Severity::Error, true) => "ERROR".red().bold().to_string(),
        (Severity::Warning, true) => "WARN ".yellow().to_string(),
    }
}

fn file_suffix(issue: &Issue) -> String {
    issue
        .file
        .as_deref()
        .map(|file| format!(" ({file})"))
        .unwrap_or_default()
}

fn banner(lines: &mut Vec<String>, title: &str, color: bool) {
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(if color {
        title.bold().to_string()
    } else {
        title.to_string()
    });
    lines.push("=".repeat(RULE_WIDTH));
}

fn section(lines: &mut Vec<String>, title: &str, color: bool) {
    lines.push(if color {
        title.bold().to_string()
    } else {
        title.to_string()
    });
    lines.push("-".repeat(RULE_WIDTH));
}

/// Human report: per-skill issues, workflow issues, count issues, summary.
#[must_use]
pub fn render_table(report: &ValidationReport, color: bool) -> String {
    let mut lines = Vec::new();
    banner(&mut lines, "SKILL VALIDATION REPORT", color);
    lines.push(String::new());

    let with_issues: Vec<_> = report
        .results
        .iter()
        .filter(|result| !result.issues.is_empty())
        .collect();
    if !with_issues.is_empty() {
        section(&mut lines, "SKILL ISSUES:", color);
        for result in with_issues {
            lines.push(format!("\n  {}:", result.unit));
            for issue in &result.issues {
                lines.push(format!(
                    "    [{}] {}: {}{}",
                    icon(issue.severity, color),
                    issue.check,
                    issue.message,
                    file_suffix(issue)
                ));
            }
        }
    }

    if !report.workflow_issues.is_empty() {
        lines.push(String::new());
        section(&mut lines, "WORKFLOW ISSUES:", color);
        for issue in &report.workflow_issues {
            let scope = if issue.unit.is_empty() {
                String::new()
            } else {
                format!("[{}] ", issue.unit)
            };
            lines.push(format!(
                "  [{}] {scope}{}: {}{}",
                icon(issue.severity, color),
                issue.check,
                issue.message,
                file_suffix(issue)
            ));
        }
    }

    if !report.count_issues.is_empty() {
        lines.push(String::new());
        section(&mut lines, "COUNT CONSISTENCY ISSUES:", color);
        for issue in &report.count_issues {
            lines.push(format!(
                "  [{}] {}{}",
                icon(issue.severity, color),
                issue.message,
                file_suffix(issue)
            ));
        }
    }

    lines.push(String::new());
    banner(&mut lines, "SUMMARY", color);
    lines.push(format!("  Skills validated: {}", report.results.len()));
    lines.push(format!("  Total errors:     {}", report.total_errors()));
    lines.push(format!("  Total warnings:   {}", report.total_warnings()));
    lines.push(String::new());

    let status = if report.has_errors() {
        let text = "STATUS: FAILED (errors found)";
        if color { text.red().bold().to_string() } else { text.to_string() }
    } else if report.total_warnings() > 0 {
        let text = "STATUS: PASSED (with warnings)";
        if color { text.yellow().to_string() } else { text.to_string() }
    } else {
        let text = "STATUS: PASSED";
        if color { text.green().bold().to_string() } else { text.to_string() }
    };
    lines.push(format!("  {status}"));
    lines.push(String::new());

    lines.join("\n")
}

/// Pretty JSON with `results`, `count_issues`, `workflow_issues` and `summary`.
pub fn render_json(report: &ValidationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&report.to_json_view())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::UnitResult;

    fn sample() -> ValidationReport {
        let mut alpha = UnitResult::new("alpha");
        alpha.issues.push(
            Issue::error("alpha", "name-format", "Name 'Alpha' doesn't match directory name 'alpha'")
                .with_file("skills/alpha/SKILL.md"),
        );
        alpha
            .issues
            .push(Issue::warning("alpha", "line-count", "Only 12 lines (minimum: 80)"));

        ValidationReport {
            results: vec![alpha, UnitResult::new("beta")],
            count_issues: vec![
                Issue::warning(
                    "__counts__",
                    "count-consistency",
                    "Skill count mismatch: file says 5, actual is 2",
                )
                .with_file("README.md"),
            ],
            workflow_issues: vec![Issue::error(
                "__manifest__",
                "manifest-dag",
                "Circular dependency: writing -> capture -> writing",
            )],
        }
    }

    #[test]
    fn table_layout() {
        insta::assert_snapshot!(render_table(&sample(), false), @r"
        ================================================================================
        SKILL VALIDATION REPORT
        ================================================================================

        SKILL ISSUES:
        --------------------------------------------------------------------------------

          alpha:
            [ERROR] name-format: Name 'Alpha' doesn't match directory name 'alpha' (skills/alpha/SKILL.md)
            [WARN ] line-count: Only 12 lines (minimum: 80)

        WORKFLOW ISSUES:
        --------------------------------------------------------------------------------
          [ERROR] [__manifest__] manifest-dag: Circular dependency: writing -> capture -> writing

        COUNT CONSISTENCY ISSUES:
        --------------------------------------------------------------------------------
          [WARN ] Skill count mismatch: file says 5, actual is 2 (README.md)

        ================================================================================
        SUMMARY
        ================================================================================
          Skills validated: 2
          Total errors:     2
          Total warnings:   2

          STATUS: FAILED (errors found)
        ");
    }

    #[test]
    fn status_lines() {
        let clean = ValidationReport {
            results: vec![UnitResult::new("alpha")],
            ..ValidationReport::default()
        };
        let text = render_table(&clean, false);
        assert!(text.contains("  STATUS: PASSED\n"));
        assert!(!text.contains("SKILL ISSUES:"));

        let mut warned = clean;
        warned
            .count_issues
            .push(Issue::warning("__counts__", "count-consistency", "off by one"));
        assert!(render_table(&warned, false).contains("  STATUS: PASSED (with warnings)"));
    }

    #[test]
    fn json_has_summary() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["summary"]["total_errors"], 2);
        assert_eq!(json["results"][1]["has_errors"], false);
        assert_eq!(json["count_issues"][0]["file"], "README.md");
    }
}
