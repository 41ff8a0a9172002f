//! Per-command workflow records.

use std::path::Path;

use super::{RecordError, WORKFLOW_SCOPE, WorkflowChecker, WorkflowContext};
use crate::frontmatter::{Mapping, Value};
use crate::report::Issue;
use crate::schema::{
    Capability, CommandStatus, DEFINITION_PHASE_FIELD, DEFINITION_REQUIRED_FIELDS,
    INPUT_REQUIRED_FIELDS, InputType, OUTPUT_REQUIRED_FIELDS, OutputType, Phase, Vocabulary,
};

const CHECK: &str = "workflow-definition";

pub struct DefinitionChecker;

impl WorkflowChecker for DefinitionChecker {
    fn name(&self) -> &'static str {
        CHECK
    }

    fn check(&self, ctx: &WorkflowContext) -> Vec<Issue> {
        if !ctx.commands_dir.exists() {
            return vec![Issue::error(
                WORKFLOW_SCOPE,
                CHECK,
                format!(
                    "Commands directory not found: {}",
                    ctx.relative(&ctx.commands_dir)
                ),
            )];
        }

        let files = ctx.definition_files();
        if files.is_empty() {
            return vec![Issue::warning(
                WORKFLOW_SCOPE,
                CHECK,
                "No workflow definition YAML files found",
            )];
        }

        files
            .iter()
            .flat_map(|path| validate_definition(ctx, path))
            .collect()
    }
}

/// Issues for one record, all scoped to its relative path.
fn validate_definition(ctx: &WorkflowContext, path: &Path) -> Vec<Issue> {
    let rel = ctx.relative(path);
    let error = |message: String| Issue::error(&rel, CHECK, message).with_file(&rel);
    let warning = |message: String| Issue::warning(&rel, CHECK, message).with_file(&rel);

    let data = match ctx.load_record(path) {
        Ok(data) => data,
        Err(RecordError::Empty) => return vec![error("YAML file is empty".to_string())],
        Err(RecordError::Unreadable(reason)) => {
            return vec![error(format!("Cannot read definition: {reason}"))];
        }
        Err(RecordError::Parse(err)) => return vec![error(format!("YAML parse error: {err}"))],
    };

    let mut issues = Vec::new();

    let command = data.text("command");
    let phased = command.contains(':');

    for field in DEFINITION_REQUIRED_FIELDS {
        if !data.contains_key(field) {
            issues.push(error(format!("Missing required field: {field}")));
        }
    }
    if phased && !data.contains_key(DEFINITION_PHASE_FIELD) {
        issues.push(error(
            "Missing required field: phase (required for phased commands)".to_string(),
        ));
    }

    let phase = data.text("phase");
    if !phase.is_empty() && Phase::parse(&phase).is_none() {
        issues.push(warning(format!(
            "Non-standard phase: '{phase}'. Expected: {}",
            Phase::expected()
        )));
    }

    if phased && !phase.is_empty() {
        let prefix = command.split(':').next().unwrap_or_default();
        if !prefix_matches_phase(prefix, &phase) {
            issues.push(warning(format!(
                "Command prefix '{prefix}' doesn't match phase '{phase}'"
            )));
        }
    }

    let status = data
        .get_present("status")
        .map_or_else(|| CommandStatus::Existing.as_str().to_string(), |v| v.to_string());
    let status_kind = CommandStatus::parse(&status);
    if status_kind.is_none() {
        issues.push(warning(format!(
            "Unknown status: '{status}'. Expected: {}",
            CommandStatus::expected()
        )));
    }

    let command_path = data.text("path");
    if !command_path.is_empty()
        && status_kind == Some(CommandStatus::Existing)
        && !ctx.resolve(&command_path).exists()
    {
        issues.push(error(format!("Command file not found: {command_path}")));
    }

    let description = data.text("description");
    if !description.is_empty() && !ctx.resolve(&description).exists() {
        issues.push(error(format!("Description file not found: {description}")));
    }

    if let Some(requires) = data.get("requires").and_then(Value::as_list) {
        for requirement in requires {
            if requirement.as_str().and_then(Capability::parse).is_none() {
                issues.push(warning(format!(
                    "Unknown requires value: '{requirement}'. Expected: {}",
                    Capability::expected()
                )));
            }
        }
    }

    issues.extend(check_entries(
        &data,
        "inputs",
        "Input",
        INPUT_REQUIRED_FIELDS,
        |tag| InputType::parse(tag).is_some(),
        &error,
        &warning,
    ));
    issues.extend(check_entries(
        &data,
        "outputs",
        "Output",
        OUTPUT_REQUIRED_FIELDS,
        |tag| OutputType::parse(tag).is_some(),
        &error,
        &warning,
    ));

    issues
}

/// Structured `inputs`/`outputs` entries: required fields and known type tag.
/// Non-mapping entries are skipped.
fn check_entries(
    data: &Mapping,
    key: &str,
    label: &str,
    required: &[&str],
    known_type: impl Fn(&str) -> bool,
    error: &dyn Fn(String) -> Issue,
    warning: &dyn Fn(String) -> Issue,
) -> Vec<Issue> {
    let Some(entries) = data.get(key).and_then(Value::as_list) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_map() else {
            continue;
        };
        for field in required {
            if !entry.contains_key(field) {
                issues.push(error(format!("{label} [{index}] missing field: {field}")));
            }
        }
        let tag = entry.text("type");
        if !tag.is_empty() && !known_type(&tag) {
            issues.push(warning(format!("{label} [{index}] unknown type: '{tag}'")));
        }
    }
    issues
}

/// Exact match, or equal after stripping trailing `s` from both sides.
fn prefix_matches_phase(prefix: &str, phase: &str) -> bool {
    prefix == phase || prefix.trim_end_matches('s') == phase.trim_end_matches('s')
}
