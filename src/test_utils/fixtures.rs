use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::checks::Unit;
use crate::frontmatter::HeaderParser;

/// Test fixture providing an isolated project root.
///
/// Layout helpers follow the default project shape: `skills/<id>/SKILL.md`,
/// `skills/<id>/references/*.md`, `commands/**`.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create a file with content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn create_dir(&self, relative_path: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        std::fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.skills_dir().join(name)
    }

    /// Write `skills/<name>/SKILL.md`.
    pub fn create_skill(&self, name: &str, content: &str) -> PathBuf {
        self.create_file(&format!("skills/{name}/SKILL.md"), content)
    }

    /// Write `skills/<skill>/references/<file>`.
    pub fn create_reference(&self, skill: &str, file: &str, content: &str) -> PathBuf {
        self.create_file(&format!("skills/{skill}/references/{file}"), content)
    }

    /// A skill that passes every rule checker, with one clean reference.
    pub fn create_valid_skill(&self, name: &str) -> PathBuf {
        self.create_reference(name, "guide.md", "# Guide\n\nPlain reference text.\n");
        self.create_skill(name, &valid_skill_document(name, name))
    }

    /// Unit handle for `skills/<name>` using the default parser.
    pub fn unit(&self, name: &str) -> Unit {
        Unit::new(self.skill_dir(name), name, HeaderParser::default())
    }
}

/// A `SKILL.md` that satisfies every rule checker with default limits.
///
/// `related` must name an existing skill directory (the skill itself works).
pub fn valid_skill_document(name: &str, related: &str) -> String {
    let mut lines = vec![
        "---".to_string(),
        format!("name: {name}"),
        "description: Use when drafting long-form pieces from research notes".to_string(),
        "metadata:".to_string(),
        "  triggers: draft, article, long-form".to_string(),
        "  role: writer".to_string(),
        "  scope: design".to_string(),
        "  output-format: document".to_string(),
        "  domain: craft".to_string(),
        format!("  related-skills: {related}"),
        "---".to_string(),
        String::new(),
        format!("# {name}"),
        String::new(),
        "## Role Definition".to_string(),
        "You are a careful long-form writer.".to_string(),
        String::new(),
        "## When to Use This Skill".to_string(),
        "- Drafting an article from notes".to_string(),
        "- Expanding an outline".to_string(),
        "- Restructuring a rough draft".to_string(),
        String::new(),
        "## Core Workflow".to_string(),
        "1. Read the notes".to_string(),
        "2. Build an outline".to_string(),
        "3. Draft each section".to_string(),
        "4. Revise for flow".to_string(),
        "5. Proofread".to_string(),
        String::new(),
        "## Reference Guide".to_string(),
        "See references/guide.md.".to_string(),
        String::new(),
        "## Constraints".to_string(),
        "- Keep the author's voice".to_string(),
        String::new(),
        "## Output Templates".to_string(),
        "A markdown document with headings.".to_string(),
        String::new(),
        "## Knowledge Reference".to_string(),
    ];
    // 20 non-blank body lines so far; pad to 90.
    for i in 1..=69 {
        lines.push(format!("- Fact {i}"));
    }
    lines.push(String::new());
    lines.push("## Related Skills".to_string());
    lines.push(String::new());
    lines.join("\n")
}
