//! Checkers over the `references/` directory of a skill.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{CheckCategory, Checker, Unit};
use crate::report::{Issue, Severity};
use crate::schema::{NON_STANDARD_MARKERS, REFERENCES_DIR};

/// `*.md` files directly inside `dir`, sorted by name.
pub(crate) fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn references_dir(unit: &Unit) -> PathBuf {
    unit.path().join(REFERENCES_DIR)
}

pub struct ReferencesDirChecker;

impl Checker for ReferencesDirChecker {
    fn name(&self) -> &'static str {
        "references-directory"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::References
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let dir = references_dir(unit);
        let message = if !dir.exists() {
            "Missing references/ directory"
        } else if !dir.is_dir() {
            "'references' exists but is not a directory"
        } else {
            return Vec::new();
        };
        vec![unit.issue(self.name(), Severity::Error, message, &dir)]
    }
}

pub struct ReferenceCountChecker;

impl Checker for ReferenceCountChecker {
    fn name(&self) -> &'static str {
        "reference-file-count"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::References
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let dir = references_dir(unit);
        if !dir.is_dir() {
            return Vec::new();
        }
        if markdown_files(&dir).is_empty() {
            return vec![unit.issue(
                self.name(),
                Severity::Warning,
                "No reference files found in references/",
                &dir,
            )];
        }
        Vec::new()
    }
}

/// Legacy marker lines near the top of reference documents.
pub struct NonStandardHeadersChecker {
    scan_lines: usize,
}

impl NonStandardHeadersChecker {
    #[must_use]
    pub const fn new(scan_lines: usize) -> Self {
        Self { scan_lines }
    }
}

impl Checker for NonStandardHeadersChecker {
    fn name(&self) -> &'static str {
        "non-standard-headers"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::References
    }

    fn check(&self, unit: &Unit) -> Vec<Issue> {
        let dir = references_dir(unit);
        if !dir.is_dir() {
            return Vec::new();
        }

        let mut issues = Vec::new();
        for file in markdown_files(&dir) {
            let content = match std::fs::read_to_string(&file) {
                Ok(content) => content,
                Err(err) => {
                    issues.push(unit.issue(
                        self.name(),
                        Severity::Error,
                        format!("Cannot read reference file: {err}"),
                        &file,
                    ));
                    continue;
                }
            };

            let head = content
                .split('\n')
                .take(self.scan_lines)
                .collect::<Vec<_>>()
                .join("\n");
            let found: Vec<String> = NON_STANDARD_MARKERS
                .iter()
                .filter(|marker| head.contains(*marker))
                .map(|marker| format!("'{marker}'"))
                .collect();

            if !found.is_empty() {
                issues.push(unit.issue(
                    self.name(),
                    Severity::Error,
                    format!(
                        "Has non-standard headers ({}) - must be removed",
                        found.join(", ")
                    ),
                    &file,
                ));
            }
        }
        issues
    }
}
