//! Workflow-level validation: command records, the phase manifest and
//! orphaned command documents.
//!
//! All paths found inside records and the manifest are resolved against the
//! project root.

mod definition;
mod manifest;
mod orphans;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::PathsConfig;
use crate::error::FrontmatterError;
use crate::frontmatter::{HeaderParser, Mapping};
use crate::report::Issue;

pub use definition::DefinitionChecker;
pub use manifest::{ManifestChecker, find_cycles};
pub use orphans::OrphanChecker;

/// Scope label for issues about the commands tree as a whole.
pub const WORKFLOW_SCOPE: &str = "__workflow__";
/// Scope label for manifest issues.
pub const MANIFEST_SCOPE: &str = "__manifest__";
/// Scope label for orphaned command documents.
pub const ORPHANS_SCOPE: &str = "__orphans__";

/// Where the workflow files live and how to parse them.
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    pub root: PathBuf,
    pub commands_dir: PathBuf,
    pub manifest: PathBuf,
    pub parser: HeaderParser,
}

impl WorkflowContext {
    pub fn new(root: impl Into<PathBuf>, paths: &PathsConfig, parser: HeaderParser) -> Self {
        let root = root.into();
        Self {
            commands_dir: root.join(&paths.commands_dir),
            manifest: root.join(&paths.manifest),
            root,
            parser,
        }
    }

    /// `path` relative to the root, with `/` separators.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Resolve a path written inside a record or the manifest.
    #[must_use]
    pub fn resolve(&self, value: &str) -> PathBuf {
        self.root.join(value)
    }

    fn is_manifest(&self, path: &Path) -> bool {
        match (path.file_name(), self.manifest.file_name()) {
            (Some(name), Some(manifest)) => name == manifest,
            _ => false,
        }
    }

    /// Every `*.yaml` under the commands directory except the manifest, sorted.
    #[must_use]
    pub fn definition_files(&self) -> Vec<PathBuf> {
        let mut files = self.files_with_extension("yaml");
        files.retain(|path| !self.is_manifest(path));
        files
    }

    /// Every file under the commands directory with `extension`, sorted.
    fn files_with_extension(&self, extension: &str) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.commands_dir)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry under commands");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == extension))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();
        files
    }

    /// Read and parse one structured record.
    pub fn load_record(&self, path: &Path) -> Result<Mapping, RecordError> {
        let text =
            std::fs::read_to_string(path).map_err(|err| RecordError::Unreadable(err.to_string()))?;
        if text.trim().is_empty() {
            return Err(RecordError::Empty);
        }
        self.parser.parse(&text).map_err(RecordError::Parse)
    }
}

/// Why a record could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Unreadable(String),
    Empty,
    Parse(FrontmatterError),
}

/// One workflow-level rule.
pub trait WorkflowChecker: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &WorkflowContext) -> Vec<Issue>;
}

/// Runs the workflow checkers in order: records, manifest, orphans.
pub struct WorkflowValidator {
    checkers: Vec<Box<dyn WorkflowChecker>>,
}

impl Default for WorkflowValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            checkers: vec![
                Box::new(DefinitionChecker),
                Box::new(ManifestChecker),
                Box::new(OrphanChecker),
            ],
        }
    }

    pub fn validate(&self, ctx: &WorkflowContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        for checker in &self.checkers {
            let found = checker.check(ctx);
            tracing::debug!(check = checker.name(), issues = found.len(), "workflow checker finished");
            issues.extend(found);
        }
        issues
    }
}
