//! Command documents that no record points at.

use std::collections::HashSet;
use std::path::Component;

use super::{ORPHANS_SCOPE, WorkflowChecker, WorkflowContext};
use crate::report::Issue;
use crate::schema::{COMMAND_INDEX_FILE, REFERENCES_DIR};

const CHECK: &str = "workflow-orphans";

pub struct OrphanChecker;

impl WorkflowChecker for OrphanChecker {
    fn name(&self) -> &'static str {
        CHECK
    }

    fn check(&self, ctx: &WorkflowContext) -> Vec<Issue> {
        if !ctx.commands_dir.is_dir() {
            return Vec::new();
        }

        // Unparsable records are reported by the definition checker.
        let referenced: HashSet<String> = ctx
            .definition_files()
            .iter()
            .filter_map(|path| ctx.load_record(path).ok())
            .filter_map(|record| record.get("path").and_then(|value| value.scalar_text()))
            .collect();

        ctx.files_with_extension("md")
            .into_iter()
            .filter(|path| {
                let under_references = path
                    .strip_prefix(&ctx.root)
                    .unwrap_or(path)
                    .components()
                    .any(|component| {
                        matches!(component, Component::Normal(name) if name == REFERENCES_DIR)
                    });
                let is_index = path
                    .file_name()
                    .is_some_and(|name| name == COMMAND_INDEX_FILE);
                !under_references && !is_index
            })
            .map(|path| ctx.relative(&path))
            .filter(|rel| !referenced.contains(rel))
            .map(|rel| {
                Issue::warning(
                    ORPHANS_SCOPE,
                    CHECK,
                    format!("Command file has no YAML definition: {rel}"),
                )
                .with_file(rel)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use crate::frontmatter::HeaderParser;
    use crate::test_utils::fixtures::UnitTestFixture;

    fn check(fixture: &UnitTestFixture) -> Vec<Issue> {
        let ctx = WorkflowContext::new(fixture.path(), &PathsConfig::default(), HeaderParser::default());
        OrphanChecker.check(&ctx)
    }

    #[test]
    fn no_commands_dir_is_silent() {
        let fixture = UnitTestFixture::new();
        assert!(check(&fixture).is_empty());
    }

    #[test]
    fn unreferenced_document_is_flagged() {
        let fixture = UnitTestFixture::new();
        fixture.create_file("commands/writing/draft.md", "# Draft\n");
        fixture.create_file("commands/writing/draft.yaml", "command: writing:draft\npath: commands/writing/draft.md\n");
        fixture.create_file("commands/writing/stray.md", "# Stray\n");
        fixture.create_file("commands/writing/COMMAND.md", "# Index\n");
        fixture.create_file("commands/writing/references/notes.md", "# Notes\n");

        let issues = check(&fixture);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].unit, "__orphans__");
        assert_eq!(
            issues[0].message,
            "Command file has no YAML definition: commands/writing/stray.md"
        );
        assert_eq!(issues[0].file.as_deref(), Some("commands/writing/stray.md"));
        assert!(!issues[0].is_error());
    }

    #[test]
    fn manifest_paths_do_not_count_as_references() {
        let fixture = UnitTestFixture::new();
        fixture.create_file("commands/help.md", "# Help\n");
        fixture.create_file("commands/workflow-manifest.yaml", "path: commands/help.md\n");

        assert_eq!(check(&fixture).len(), 1);
    }
}
