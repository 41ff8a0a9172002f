use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

use skillcheck::test_utils::valid_skill_document;

fn write(root: &TempDir, relative: &str, content: &str) {
    let path = root.path().join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project_with_skill(name: &str) -> TempDir {
    let dir = tempdir().unwrap();
    write(&dir, &format!("skills/{name}/SKILL.md"), &valid_skill_document(name, name));
    write(&dir, &format!("skills/{name}/references/guide.md"), "# Guide\n");
    dir
}

fn skillcheck() -> Command {
    let mut cmd = Command::cargo_bin("skillcheck").unwrap();
    cmd.env_remove("SKILLCHECK_CONFIG")
        .env_remove("SKILLCHECK_SKILLS_DIR")
        .env_remove("SKILLCHECK_COMMANDS_DIR")
        .env_remove("SKILLCHECK_PARSER")
        .env_remove("SKILLCHECK_MIN_LINES")
        .env_remove("SKILLCHECK_MAX_LINES")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    skillcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    skillcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_single_clean_skill_passes() {
    let dir = project_with_skill("foo-bar");

    skillcheck()
        .args(["-q", "validate", "--skill", "foo-bar", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS: PASSED"))
        .stdout(predicate::str::contains("Skills validated: 1"));
}

#[test]
fn test_validate_json_and_exit_code() {
    let dir = project_with_skill("foo-bar");
    write(&dir, "skills/broken/SKILL.md", "not a header\n");

    let output = skillcheck()
        .args(["-q", "validate", "--check", "yaml", "--format", "json", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total_skills"], 2);
    assert_eq!(json["summary"]["has_errors"], true);
    assert_eq!(json["results"][0]["skill"], "broken");
    assert_eq!(json["results"][0]["issues"][0]["check"], "yaml");
}

#[test]
fn test_unknown_skill_is_run_error() {
    let dir = project_with_skill("foo-bar");

    skillcheck()
        .args(["-q", "validate", "--skill", "nope", "--root"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Skill not found: nope"));
}

#[test]
fn test_missing_skills_dir_is_run_error() {
    let dir = tempdir().unwrap();

    skillcheck()
        .args(["-q", "validate", "--check", "yaml", "--root"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Skills directory not found"));
}

#[test]
fn test_config_file_changes_skills_dir() {
    let dir = tempdir().unwrap();
    write(&dir, "units/foo-bar/SKILL.md", &valid_skill_document("foo-bar", "foo-bar"));
    write(&dir, "units/foo-bar/references/guide.md", "# Guide\n");
    write(&dir, "skillcheck.toml", "[paths]\nskills_dir = \"units\"\n");

    skillcheck()
        .args(["-q", "validate", "--check", "references", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS: PASSED"));
}

#[test]
fn test_workflows_check_reports_missing_commands() {
    let dir = tempdir().unwrap();

    skillcheck()
        .args(["-q", "validate", "--check", "workflows", "--root"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Commands directory not found: commands"))
        .stdout(predicate::str::contains("Skills validated: 0"));
}

#[test]
fn test_markdown_scan() {
    let dir = tempdir().unwrap();
    write(&dir, "docs/ok.md", "| a | b |\n|---|---|\n| 1 | 2 |\n");

    skillcheck()
        .args(["-q", "markdown"])
        .arg(dir.path().join("docs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No markdown issues found."));

    write(&dir, "docs/bad.md", "| a | b |\n| 1 | 2 |\n");
    let output = skillcheck()
        .args(["-q", "markdown", "--format", "json"])
        .arg(dir.path().join("docs"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["type"], "missing-table-separator");
}

#[test]
fn test_markdown_missing_path() {
    skillcheck()
        .args(["-q", "markdown", "/definitely/not/here"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path does not exist"));
}
