//! The phase manifest: structure, references, duplicate commands, the
//! phase dependency graph and agreement with command records.

use std::collections::{HashMap, HashSet};

use super::{MANIFEST_SCOPE, RecordError, WorkflowChecker, WorkflowContext};
use crate::frontmatter::{Mapping, Value};
use crate::report::Issue;
use crate::schema::{DependencyStrength, Vocabulary};

const CHECK: &str = "manifest-dag";

pub struct ManifestChecker;

impl WorkflowChecker for ManifestChecker {
    fn name(&self) -> &'static str {
        CHECK
    }

    fn check(&self, ctx: &WorkflowContext) -> Vec<Issue> {
        let label = ctx.relative(&ctx.manifest);
        let error = |message: String| Issue::error(MANIFEST_SCOPE, CHECK, message).with_file(&label);
        let warning =
            |message: String| Issue::warning(MANIFEST_SCOPE, CHECK, message).with_file(&label);

        if !ctx.manifest.exists() {
            return vec![Issue::error(
                MANIFEST_SCOPE,
                CHECK,
                format!("Manifest file not found: {label}"),
            )];
        }

        let data = match ctx.load_record(&ctx.manifest) {
            Ok(data) => data,
            Err(RecordError::Empty) => return vec![error("Manifest is empty".to_string())],
            Err(RecordError::Unreadable(reason)) => {
                return vec![error(format!("Cannot read manifest: {reason}"))];
            }
            Err(RecordError::Parse(err)) => {
                return vec![error(format!("YAML parse error: {err}"))];
            }
        };

        let phases = match data.get_present("phases") {
            Some(Value::Map(phases)) if !phases.is_empty() => phases,
            None | Some(Value::Map(_)) => {
                return vec![error("No phases defined in manifest".to_string())];
            }
            Some(Value::List(items)) if items.is_empty() => {
                return vec![error("No phases defined in manifest".to_string())];
            }
            Some(_) => return vec![error("'phases' must be a mapping".to_string())],
        };

        let mut issues = Vec::new();
        let phase_names: HashSet<&str> = phases.keys().collect();
        let mut commands = CommandRegistry::default();

        for (phase_name, phase) in phases.iter() {
            let Some(phase) = phase.as_map() else {
                issues.push(error(format!("Phase '{phase_name}' must be a mapping")));
                continue;
            };

            let description = phase.text("description");
            if !description.is_empty() && !ctx.resolve(&description).exists() {
                issues.push(error(format!(
                    "Phase '{phase_name}' description not found: {description}"
                )));
            }

            for dependency in mappings(phase, "depends_on") {
                let target = dependency.text("phase");
                if !target.is_empty() && !phase_names.contains(target.as_str()) {
                    issues.push(error(format!(
                        "Phase '{phase_name}' depends on undefined phase: '{target}'"
                    )));
                }
                let strength = dependency.text("strength");
                if !strength.is_empty() && DependencyStrength::parse(&strength).is_none() {
                    issues.push(warning(format!(
                        "Phase '{phase_name}' dependency strength '{strength}' not standard"
                    )));
                }
            }

            for entry in mappings(phase, "commands") {
                let name = entry.text("command");
                if let Some(message) = commands.register(&name) {
                    issues.push(error(message));
                }
                let definition = entry.text("definition");
                if !definition.is_empty() && !ctx.resolve(&definition).exists() {
                    issues.push(error(format!(
                        "Command '{name}' definition not found: {definition}"
                    )));
                }
            }
        }

        for entry in mappings(&data, "utilities") {
            let name = entry.text("command");
            if let Some(message) = commands.register(&name) {
                issues.push(error(message));
            }
            let definition = entry.text("definition");
            if !definition.is_empty() && !ctx.resolve(&definition).exists() {
                issues.push(error(format!(
                    "Utility '{name}' definition not found: {definition}"
                )));
            }
        }

        for cycle in find_cycles(&dependency_graph(phases)) {
            issues.push(error(format!("DAG cycle detected: {}", cycle.join(" -> "))));
        }

        let listed = phases
            .iter()
            .filter_map(|(_, phase)| phase.as_map())
            .flat_map(|phase| mappings(phase, "commands"))
            .chain(mappings(&data, "utilities"));
        for entry in listed {
            if let Some(message) = definition_mismatch(ctx, entry) {
                issues.push(error(message));
            }
        }

        issues
    }
}

/// Mapping entries of the list under `key`; anything else is skipped.
fn mappings<'a>(map: &'a Mapping, key: &'static str) -> impl Iterator<Item = &'a Mapping> {
    map.get(key)
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_map)
}

/// Command names seen across all phases and then the utilities.
#[derive(Default)]
struct CommandRegistry {
    seen: HashSet<String>,
    reported: HashSet<String>,
}

impl CommandRegistry {
    /// Record `name`; a message the first time it repeats.
    fn register(&mut self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        if self.seen.insert(name.to_string()) {
            return None;
        }
        self.reported
            .insert(name.to_string())
            .then(|| format!("Duplicate command: '{name}'"))
    }
}

/// Manifest name vs. the `command` declared inside the referenced record.
/// Missing or unparsable records are reported elsewhere.
fn definition_mismatch(ctx: &WorkflowContext, entry: &Mapping) -> Option<String> {
    let name = entry.text("command");
    let definition = entry.text("definition");
    if definition.is_empty() {
        return None;
    }
    let path = ctx.resolve(&definition);
    if !path.is_file() {
        return None;
    }
    let record = ctx.load_record(&path).ok().filter(|record| !record.is_empty())?;
    let declared = record.text("command");
    (declared != name).then(|| {
        format!(
            "Manifest command '{name}' doesn't match definition command '{declared}' in {definition}"
        )
    })
}

/// Phase name to the phases it depends on, in manifest order.
fn dependency_graph(phases: &Mapping) -> Vec<(String, Vec<String>)> {
    phases
        .iter()
        .filter_map(|(name, phase)| phase.as_map().map(|phase| (name, phase)))
        .map(|(name, phase)| {
            let targets = mappings(phase, "depends_on")
                .map(|dependency| dependency.text("phase"))
                .filter(|target| !target.is_empty())
                .collect();
            (name.to_string(), targets)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Cycles in a dependency graph, each as a closed path `[a, b, .., a]`.
///
/// Three-color depth-first search from every unvisited node in input order.
/// Edges to nodes missing from the graph are ignored. Once a node closes a
/// cycle, its remaining edges are not explored, so a single loop is reported
/// once.
#[must_use]
pub fn find_cycles(graph: &[(String, Vec<String>)]) -> Vec<Vec<String>> {
    let index: HashMap<&str, usize> = graph
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), i))
        .collect();
    let mut color = vec![Color::White; graph.len()];
    let mut path = Vec::new();
    let mut cycles = Vec::new();

    for start in 0..graph.len() {
        if color[start] == Color::White {
            dfs_detect_cycles(start, graph, &index, &mut color, &mut path, &mut cycles);
        }
    }

    cycles
}

fn dfs_detect_cycles(
    node: usize,
    graph: &[(String, Vec<String>)],
    index: &HashMap<&str, usize>,
    color: &mut [Color],
    path: &mut Vec<usize>,
    cycles: &mut Vec<Vec<String>>,
) {
    color[node] = Color::Gray;
    path.push(node);

    for target in &graph[node].1 {
        let Some(&next) = index.get(target.as_str()) else {
            continue;
        };
        match color[next] {
            Color::Gray => {
                if let Some(cycle_start) = path.iter().position(|&n| n == next) {
                    let mut cycle: Vec<String> = path[cycle_start..]
                        .iter()
                        .map(|&n| graph[n].0.clone())
                        .collect();
                    cycle.push(graph[next].0.clone());
                    cycles.push(cycle);
                }
                break;
            }
            Color::White => dfs_detect_cycles(next, graph, index, color, path, cycles),
            Color::Black => {}
        }
    }

    path.pop();
    color[node] = Color::Black;
}
