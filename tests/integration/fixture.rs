use std::path::{Path, PathBuf};

use tempfile::TempDir;

use skillcheck::config::Config;
use skillcheck::report::{Issue, ValidationReport};
use skillcheck::test_utils::valid_skill_document;
use skillcheck::validator::{self, CheckFilter, ValidationOptions};

/// A throwaway project root with the default layout.
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// A skill that passes every rule checker.
    pub fn valid_skill(&self, name: &str) {
        self.write(&format!("skills/{name}/SKILL.md"), &valid_skill_document(name, name));
        self.write(
            &format!("skills/{name}/references/guide.md"),
            "# Guide\n\nPlain reference text.\n",
        );
    }

    pub fn manifest(&self, content: &str) {
        self.write("commands/workflow-manifest.yaml", content);
    }

    /// A phased record plus the document it points at.
    pub fn command(&self, phase: &str, name: &str) {
        let doc = format!("commands/{phase}/{name}.md");
        self.write(&doc, &format!("# {name}\n"));
        self.write(
            &format!("commands/{phase}/{name}.yaml"),
            &format!(
                "command: {phase}:{name}\nphase: {phase}\npath: {doc}\ndescription: {doc}\ninputs: []\noutputs: []\nrequires: []\n"
            ),
        );
    }

    pub fn options(&self) -> ValidationOptions {
        ValidationOptions::from_config(self.root(), &Config::default()).expect("default options")
    }

    pub fn run(&self, check: Option<CheckFilter>, skill: Option<&str>) -> ValidationReport {
        let mut options = self.options();
        options.check = check;
        options.skill = skill.map(str::to_string);
        validator::run(&options).expect("validation run")
    }
}

pub fn messages(issues: &[Issue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.message.as_str()).collect()
}
