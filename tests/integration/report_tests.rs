use serde_json::Value;

use skillcheck::cli::output::{render_json, render_table};

use super::fixture::TestProject;

#[test]
fn test_full_run_json_shape() {
    let project = TestProject::new();
    project.valid_skill("alpha");
    project.write("skills/beta/SKILL.md", "---\nname: beta\n---\n");

    let report = project.run(None, None);
    let json: Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

    assert_eq!(json["summary"]["total_skills"], 2);
    assert_eq!(json["summary"]["has_errors"], true);
    assert_eq!(json["results"][0]["skill"], "alpha");
    assert_eq!(json["results"][0]["has_errors"], false);
    assert_eq!(json["results"][1]["skill"], "beta");
    assert_eq!(json["results"][1]["has_errors"], true);
    assert!(json["workflow_issues"].as_array().is_some());
    assert!(json["count_issues"].as_array().unwrap().is_empty());

    let total: usize = report
        .results
        .iter()
        .map(|result| result.issues.len())
        .sum::<usize>()
        + report.workflow_issues.len()
        + report.count_issues.len();
    assert_eq!(report.total_errors() + report.total_warnings(), total);
}

#[test]
fn test_table_lists_failing_skill_only() {
    let project = TestProject::new();
    project.valid_skill("alpha");
    project.write("skills/beta/SKILL.md", "---\nname: beta\n---\n");

    let table = render_table(&project.run(None, None), false);
    assert!(table.contains("\n  beta:\n"));
    assert!(!table.contains("\n  alpha:\n"));
    assert!(table.contains("WORKFLOW ISSUES:"));
    assert!(table.contains("  Skills validated: 2"));
    assert!(table.ends_with("  STATUS: FAILED (errors found)\n"));
}
