//! Advertised skill and reference counts in project docs vs. the tree.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::report::Issue;
use crate::schema::{COUNT_FILES, REFERENCES_DIR, SKILL_FILE};

/// Scope label for count issues.
pub const COUNTS_SCOPE: &str = "__counts__";

const CHECK: &str = "count-consistency";

static SKILL_COUNT_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)(\d+)\s*(?:specialized\s+)?skills").expect("valid regex"),
        Regex::new(r"(?i)(\d+)\s*Skills").expect("valid regex"),
    ]
});
static REFERENCE_COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[Rr]eference\s*[Ff]iles").expect("valid regex"));

/// Actual counts found on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub skills: u64,
    pub references: u64,
}

impl TreeCounts {
    /// Skill directories holding a `SKILL.md`, and `*.md` files inside any
    /// `references/` directory under `skills_dir`.
    #[must_use]
    pub fn scan(skills_dir: &Path) -> Self {
        let skills = std::fs::read_dir(skills_dir)
            .map(|entries| {
                entries
                    .filter_map(std::result::Result::ok)
                    .filter(|entry| entry.path().is_dir() && entry.path().join(SKILL_FILE).exists())
                    .count()
            })
            .unwrap_or(0);

        let references = WalkDir::new(skills_dir)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| {
                entry.path().extension().is_some_and(|ext| ext == "md")
                    && entry
                        .path()
                        .parent()
                        .and_then(Path::file_name)
                        .is_some_and(|name| name == REFERENCES_DIR)
            })
            .count();

        Self {
            skills: skills as u64,
            references: references as u64,
        }
    }
}

/// Compare counts advertised in the project docs with the tree.
///
/// Per file and pattern, only the first mismatching number is reported.
#[must_use]
pub fn check_counts(root: &Path, skills_dir: &Path) -> Vec<Issue> {
    let actual = TreeCounts::scan(skills_dir);
    tracing::debug!(skills = actual.skills, references = actual.references, "tree counts");

    let mut issues = Vec::new();
    for file in COUNT_FILES {
        let path = root.join(file);
        if !path.exists() {
            continue;
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable count file");
                continue;
            }
        };
        let label = path.display().to_string();

        for pattern in SKILL_COUNT_PATTERNS.iter() {
            if let Some(found) = first_mismatch(pattern, &content, actual.skills) {
                issues.push(
                    Issue::warning(
                        COUNTS_SCOPE,
                        CHECK,
                        format!(
                            "Skill count mismatch: file says {found}, actual is {}",
                            actual.skills
                        ),
                    )
                    .with_file(&label),
                );
            }
        }

        if let Some(found) = first_mismatch(&REFERENCE_COUNT_PATTERN, &content, actual.references) {
            issues.push(
                Issue::warning(
                    COUNTS_SCOPE,
                    CHECK,
                    format!(
                        "Reference count mismatch: file says {found}, actual is {}",
                        actual.references
                    ),
                )
                .with_file(&label),
            );
        }
    }
    issues
}

fn first_mismatch(pattern: &Regex, content: &str, actual: u64) -> Option<u64> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .find(|&found| found != actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::UnitTestFixture;

    fn project() -> UnitTestFixture {
        let fixture = UnitTestFixture::new();
        fixture.create_skill("alpha", "---\nname: alpha\n---\n");
        fixture.create_skill("beta", "---\nname: beta\n---\n");
        fixture.create_dir("skills/empty");
        fixture.create_reference("alpha", "one.md", "");
        fixture.create_reference("beta", "two.md", "");
        fixture.create_reference("beta", "three.md", "");
        fixture
    }

    #[test]
    fn scan_counts_tree() {
        let fixture = project();
        let counts = TreeCounts::scan(&fixture.skills_dir());
        assert_eq!(
            counts,
            TreeCounts {
                skills: 2,
                references: 3
            }
        );
    }

    #[test]
    fn matching_counts_are_silent() {
        let fixture = project();
        fixture.create_file("README.md", "Ships 2 specialized skills and 3 reference files.\n");

        assert!(check_counts(fixture.path(), &fixture.skills_dir()).is_empty());
    }

    #[test]
    fn mismatches_reported_once_per_pattern() {
        let fixture = project();
        fixture.create_file(
            ".claude-plugin/plugin.json",
            "{\"description\": \"7 skills, 9 skills, 4 Reference Files\"}",
        );

        let issues = check_counts(fixture.path(), &fixture.skills_dir());
        let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Skill count mismatch: file says 7, actual is 2",
                "Skill count mismatch: file says 7, actual is 2",
                "Reference count mismatch: file says 4, actual is 3",
            ]
        );
        assert!(issues.iter().all(|i| i.unit == "__counts__" && !i.is_error()));
    }

    #[test]
    fn missing_docs_are_skipped() {
        let fixture = project();
        assert!(check_counts(fixture.path(), &fixture.skills_dir()).is_empty());
    }
}
