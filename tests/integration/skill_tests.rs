use skillcheck::frontmatter::HeaderParser;
use skillcheck::validator::{self, CheckFilter};

use super::fixture::{TestProject, messages};

#[test]
fn test_complete_skill_has_no_issues() {
    let project = TestProject::new();
    project.valid_skill("foo-bar");

    let report = project.run(None, Some("foo-bar"));
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].unit, "foo-bar");
    assert!(
        report.results[0].issues.is_empty(),
        "unexpected issues: {:?}",
        report.results[0].issues
    );
    assert!(report.workflow_issues.is_empty());
    assert!(report.count_issues.is_empty());
}

#[test]
fn test_complete_skill_clean_with_fallback_parser() {
    let project = TestProject::new();
    project.valid_skill("foo-bar");

    let mut options = project.options();
    options.parser = HeaderParser::Fallback;
    options.skill = Some("foo-bar".into());
    let report = validator::run(&options).unwrap();
    assert!(report.results[0].issues.is_empty());
}

#[test]
fn test_one_error_per_missing_required_field() {
    let project = TestProject::new();
    project.write(
        "skills/bare/SKILL.md",
        "---\nmetadata:\n  role: writer\n---\n# Bare\n",
    );

    let report = project.run(Some(CheckFilter::Yaml), None);
    let required: Vec<_> = report.results[0]
        .issues
        .iter()
        .filter(|issue| issue.check == "required-fields")
        .collect();
    assert_eq!(required.len(), 2);
    assert!(required.iter().all(|issue| issue.is_error()));
}

#[test]
fn test_broken_skill_does_not_stop_others() {
    let project = TestProject::new();
    project.valid_skill("alpha");
    project.write("skills/broken/SKILL.md", "no header here\n");
    project.valid_skill("gamma");

    let report = project.run(Some(CheckFilter::Yaml), None);
    let units: Vec<_> = report.results.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(units, vec!["alpha", "broken", "gamma"]);

    assert!(report.results[0].issues.is_empty());
    assert_eq!(
        messages(&report.results[1].issues),
        vec!["SKILL.md does not start with YAML frontmatter (---)"]
    );
    assert!(report.results[2].issues.is_empty());
    assert!(report.has_errors());
}

#[test]
fn test_hidden_directories_are_skipped() {
    let project = TestProject::new();
    project.valid_skill("alpha");
    project.write("skills/.drafts/SKILL.md", "---\n---\n");

    let report = project.run(Some(CheckFilter::Yaml), None);
    assert_eq!(report.results.len(), 1);
}

#[test]
fn test_count_mismatch_in_readme() {
    let project = TestProject::new();
    project.valid_skill("alpha");
    project.valid_skill("beta");
    project.write("README.md", "A plugin with 3 specialized skills and 2 reference files.\n");

    let report = project.run(None, None);
    assert_eq!(
        messages(&report.count_issues),
        vec!["Skill count mismatch: file says 3, actual is 2"]
    );
    assert!(report.count_issues[0]
        .file
        .as_deref()
        .unwrap()
        .ends_with("README.md"));
}

#[test]
fn test_counts_skipped_with_filters() {
    let project = TestProject::new();
    project.valid_skill("alpha");
    project.write("README.md", "Ships 9 skills.\n");

    assert!(project.run(Some(CheckFilter::Yaml), None).count_issues.is_empty());
    assert!(project.run(None, Some("alpha")).count_issues.is_empty());
    assert_eq!(project.run(None, None).count_issues.len(), 2);
}
