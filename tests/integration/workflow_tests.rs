use skillcheck::report::Issue;
use skillcheck::validator::CheckFilter;

use super::fixture::{TestProject, messages};

const MANIFEST: &str = "\
phases:
  capture:
    description: commands/capture/COMMAND.md
    commands:
      - command: capture:notes
        definition: commands/capture/notes.yaml
  writing:
    description: commands/writing/COMMAND.md
    depends_on:
      - phase: capture
        strength: required
    commands:
      - command: writing:draft
        definition: commands/writing/draft.yaml
";

fn workflow_project() -> TestProject {
    let project = TestProject::new();
    project.command("capture", "notes");
    project.command("writing", "draft");
    project.write("commands/capture/COMMAND.md", "# Capture\n");
    project.write("commands/writing/COMMAND.md", "# Writing\n");
    project.manifest(MANIFEST);
    project
}

fn workflow_issues(project: &TestProject) -> Vec<Issue> {
    project.run(Some(CheckFilter::Workflows), None).workflow_issues
}

fn with_check<'a>(issues: &'a [Issue], check: &str) -> Vec<&'a Issue> {
    issues.iter().filter(|issue| issue.check == check).collect()
}

#[test]
fn test_consistent_workflow_is_clean() {
    let project = workflow_project();
    let issues = workflow_issues(&project);
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn test_workflows_filter_skips_rule_checkers() {
    let project = workflow_project();
    let report = project.run(Some(CheckFilter::Workflows), None);
    assert!(report.results.is_empty());
    assert!(report.count_issues.is_empty());
    assert!(!report.has_errors());
}

#[test]
fn test_dangling_phase_dependency() {
    let project = workflow_project();
    project.manifest(
        "phases:\n  writing:\n    depends_on:\n      - phase: unknown\n        strength: required\n",
    );

    let issues = workflow_issues(&project);
    let manifest = with_check(&issues, "manifest-dag");
    assert_eq!(manifest.len(), 1);
    assert_eq!(
        manifest[0].message,
        "Phase 'writing' depends on undefined phase: 'unknown'"
    );
    assert!(manifest[0].is_error());
    assert!(!issues.iter().any(|issue| issue.message.contains("cycle")));
}

#[test]
fn test_phase_cycle_reported_in_traversal_order() {
    let project = TestProject::new();
    project.manifest(
        "phases:\n  a:\n    depends_on:\n      - phase: b\n  b:\n    depends_on:\n      - phase: c\n  c:\n    depends_on:\n      - phase: a\n",
    );

    let issues = workflow_issues(&project);
    let cycles: Vec<_> = issues
        .iter()
        .filter(|issue| issue.message.starts_with("DAG cycle detected"))
        .collect();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].message, "DAG cycle detected: a -> b -> c -> a");
    assert_eq!(cycles[0].unit, "__manifest__");
}

#[test]
fn test_diamond_dependencies_are_not_cycles() {
    let project = TestProject::new();
    project.manifest(
        "phases:\n  top:\n    depends_on:\n      - phase: left\n      - phase: right\n  left:\n    depends_on:\n      - phase: base\n  right:\n    depends_on:\n      - phase: base\n  base:\n    description: ''\n",
    );

    let issues = workflow_issues(&project);
    assert!(with_check(&issues, "manifest-dag").is_empty(), "{issues:?}");
}

#[test]
fn test_duplicate_command_across_phase_and_utilities() {
    let project = workflow_project();
    project.manifest(&format!(
        "{MANIFEST}utilities:\n  - command: writing:draft\n    definition: commands/writing/draft.yaml\n"
    ));

    let issues = workflow_issues(&project);
    let duplicates: Vec<_> = issues
        .iter()
        .filter(|issue| issue.message.starts_with("Duplicate command"))
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].message, "Duplicate command: 'writing:draft'");
}

#[test]
fn test_orphaned_command_document() {
    let project = workflow_project();
    project.write("commands/writing/stray.md", "# Stray\n");

    let issues = workflow_issues(&project);
    let orphans: Vec<_> = with_check(&issues, "workflow-orphans")
        .into_iter()
        .map(|issue| issue.message.as_str())
        .collect();
    assert_eq!(
        orphans,
        vec!["Command file has no YAML definition: commands/writing/stray.md"]
    );
    assert!(!issues.iter().any(Issue::is_error));
}

#[test]
fn test_definition_problems_are_scoped_to_the_record() {
    let project = workflow_project();
    project.write(
        "commands/writing/outline.yaml",
        "command: writing:outline\nphase: writing\npath: commands/writing/outline.md\n",
    );

    let issues = workflow_issues(&project);
    let record: Vec<_> = issues
        .iter()
        .filter(|issue| issue.unit == "commands/writing/outline.yaml")
        .collect();
    let found: Vec<_> = record.iter().map(|issue| issue.message.as_str()).collect();
    assert_eq!(
        found,
        vec![
            "Missing required field: description",
            "Missing required field: inputs",
            "Missing required field: outputs",
            "Missing required field: requires",
            "Command file not found: commands/writing/outline.md",
        ]
    );
    assert!(record.iter().all(|issue| issue.is_error()));
}

#[test]
fn test_manifest_definition_mismatch() {
    let project = workflow_project();
    project.write(
        "commands/capture/notes.yaml",
        "command: capture:clips\nphase: capture\npath: commands/capture/notes.md\ndescription: commands/capture/notes.md\ninputs: []\noutputs: []\nrequires: []\n",
    );

    let issues = workflow_issues(&project);
    assert_eq!(
        messages(&issues),
        vec![
            "Manifest command 'capture:notes' doesn't match definition command 'capture:clips' in commands/capture/notes.yaml"
        ]
    );
}
