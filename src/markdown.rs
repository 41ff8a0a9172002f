//! Line-oriented structure scan for markdown files.
//!
//! Catches the breakages renderers silently swallow: fences left open,
//! HTML comments splitting a table, headers without a separator row and
//! rows whose column count differs from the header.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Result, SkillcheckError};

static SEPARATOR_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("valid regex"));

const FENCE: &str = "```";

/// Kind of structural problem. Variant order is the report grouping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkdownIssueKind {
    ColumnCountMismatch,
    HtmlInTable,
    MissingTableSeparator,
    UnclosedCodeBlock,
}

impl MarkdownIssueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColumnCountMismatch => "column-count-mismatch",
            Self::HtmlInTable => "html-in-table",
            Self::MissingTableSeparator => "missing-table-separator",
            Self::UnclosedCodeBlock => "unclosed-code-block",
        }
    }
}

impl fmt::Display for MarkdownIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownIssue {
    pub file: PathBuf,
    /// 1-based.
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: MarkdownIssueKind,
    pub message: String,
}

impl MarkdownIssue {
    fn new(file: &Path, line: usize, kind: MarkdownIssueKind, message: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for MarkdownIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file.display(),
            self.line,
            self.kind,
            self.message
        )
    }
}

fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

fn is_table_row(line: &str) -> bool {
    let stripped = line.trim();
    stripped.starts_with('|') && stripped.ends_with('|') && stripped.len() > 2
}

fn is_separator_row(line: &str) -> bool {
    SEPARATOR_ROW.is_match(line.trim())
}

fn has_html_comment(line: &str) -> bool {
    line.contains("<!--")
}

/// Pipes minus one, ignoring escaped `\|`. A table row keeps its leading pipe.
fn count_columns(line: &str) -> usize {
    let cleaned = line.trim().replace("\\|", "");
    cleaned.matches('|').count().saturating_sub(1)
}

/// Scan markdown text; `file` only labels the issues.
#[must_use]
pub fn scan_text(file: &Path, content: &str) -> Vec<MarkdownIssue> {
    let lines: Vec<&str> = content.lines().collect();
    let mut issues = Vec::new();

    let mut open_fence = None;
    for (idx, line) in lines.iter().enumerate() {
        if is_fence(line) {
            open_fence = match open_fence {
                None => Some(idx + 1),
                Some(_) => None,
            };
        }
    }
    if let Some(line) = open_fence {
        issues.push(MarkdownIssue::new(
            file,
            line,
            MarkdownIssueKind::UnclosedCodeBlock,
            format!("Code block opened at line {line} is never closed"),
        ));
    }

    let mut in_code = false;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_fence(line) {
            in_code = !in_code;
            i += 1;
            continue;
        }
        if in_code || !is_table_row(line) {
            i += 1;
            continue;
        }

        let header_cols = count_columns(line);
        i += 1;
        let Some(&next) = lines.get(i) else {
            break;
        };

        if has_html_comment(next) {
            issues.push(MarkdownIssue::new(
                file,
                i + 1,
                MarkdownIssueKind::HtmlInTable,
                "HTML comment interrupts table structure",
            ));
            i += 1;
            continue;
        }
        if !is_separator_row(next) {
            issues.push(MarkdownIssue::new(
                file,
                i + 1,
                MarkdownIssueKind::MissingTableSeparator,
                "Table header not followed by separator row",
            ));
            i += 1;
            continue;
        }

        // Data rows; the line that ends the table is rescanned by the outer loop.
        i += 1;
        while let Some(&row) = lines.get(i) {
            if has_html_comment(row) {
                issues.push(MarkdownIssue::new(
                    file,
                    i + 1,
                    MarkdownIssueKind::HtmlInTable,
                    "HTML comment interrupts table structure",
                ));
            }
            if row.trim().is_empty() || !is_table_row(row) {
                break;
            }
            let cols = count_columns(row);
            if cols != header_cols {
                issues.push(MarkdownIssue::new(
                    file,
                    i + 1,
                    MarkdownIssueKind::ColumnCountMismatch,
                    format!("Expected {header_cols} columns, got {cols}"),
                ));
            }
            i += 1;
        }
    }

    issues
}

/// Scan one file.
pub fn scan_file(path: &Path) -> Result<Vec<MarkdownIssue>> {
    let content = std::fs::read_to_string(path)?;
    Ok(scan_text(path, &content))
}

/// Scan a single file, or every `*.md` below a directory in sorted order.
///
/// Files that cannot be read inside a directory are logged and skipped.
pub fn scan_path(path: &Path) -> Result<Vec<MarkdownIssue>> {
    if !path.exists() {
        return Err(SkillcheckError::PathNotFound(path.to_path_buf()));
    }
    if path.is_file() {
        return scan_file(path);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    tracing::debug!(path = %path.display(), files = files.len(), "scanning markdown");

    let mut issues = Vec::new();
    for file in files {
        match scan_file(&file) {
            Ok(found) => issues.extend(found),
            Err(err) => {
                tracing::warn!(path = %file.display(), error = %err, "skipping unreadable markdown file");
            }
        }
    }
    Ok(issues)
}

/// Human report grouped by kind.
#[must_use]
pub fn render_text(issues: &[MarkdownIssue]) -> String {
    if issues.is_empty() {
        return "No markdown issues found.".to_string();
    }

    let mut by_kind: BTreeMap<MarkdownIssueKind, Vec<&MarkdownIssue>> = BTreeMap::new();
    for issue in issues {
        by_kind.entry(issue.kind).or_default().push(issue);
    }

    let mut lines = Vec::new();
    for (kind, group) in by_kind {
        lines.push(format!(
            "\n{} ({} issues):",
            kind.as_str().to_uppercase(),
            group.len()
        ));
        lines.extend(group.iter().map(|issue| format!("  {issue}")));
    }
    lines.push(format!("\nTotal: {} issues found", issues.len()));
    lines.join("\n")
}

/// Pretty JSON array of `{file, line, type, message}`.
pub fn render_json(issues: &[MarkdownIssue]) -> Result<String> {
    Ok(serde_json::to_string_pretty(issues)?)
}
