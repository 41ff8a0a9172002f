//! Run orchestration: which validators run for a given filter combination.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::checks::{self, CheckCategory, Unit};
use crate::config::{Config, LimitsConfig, PathsConfig};
use crate::counts;
use crate::error::{Result, SkillcheckError};
use crate::frontmatter::HeaderParser;
use crate::report::{UnitResult, ValidationReport};
use crate::workflow::{WorkflowContext, WorkflowValidator};

/// Value of `--check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckFilter {
    /// Header parsing, required fields and format rules
    Yaml,
    /// References directory, count and legacy markers
    References,
    /// Command records, manifest and orphaned documents
    Workflows,
}

impl CheckFilter {
    /// Rule-checker category, `None` for the workflow-only filter.
    #[must_use]
    pub const fn category(self) -> Option<CheckCategory> {
        match self {
            Self::Yaml => Some(CheckCategory::Yaml),
            Self::References => Some(CheckCategory::References),
            Self::Workflows => None,
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Project root; relative configured paths resolve against it.
    pub root: PathBuf,
    pub paths: PathsConfig,
    pub limits: LimitsConfig,
    pub parser: HeaderParser,
    pub check: Option<CheckFilter>,
    pub skill: Option<String>,
}

impl ValidationOptions {
    /// Options from loaded config, no filters.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            paths: config.paths.clone(),
            limits: config.limits,
            parser: HeaderParser::resolve(config.parser.mode)?,
            check: None,
            skill: None,
        })
    }

    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join(&self.paths.skills_dir)
    }

    fn runs_rule_checkers(&self) -> bool {
        self.check != Some(CheckFilter::Workflows)
    }

    fn runs_workflows(&self) -> bool {
        match self.check {
            Some(CheckFilter::Workflows) => true,
            Some(_) => false,
            None => self.skill.is_none(),
        }
    }

    fn runs_counts(&self) -> bool {
        self.check.is_none() && self.skill.is_none()
    }
}

/// Skill directories under `skills_dir`, sorted, hidden ones skipped.
pub fn discover_units(skills_dir: &Path) -> Result<Vec<PathBuf>> {
    if !skills_dir.is_dir() {
        return Err(SkillcheckError::UnitsDirNotFound(skills_dir.to_path_buf()));
    }

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(skills_dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if path.is_dir() && !hidden {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Run the validators selected by `options` and collect one report.
pub fn run(options: &ValidationOptions) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    let skills_dir = options.skills_dir();

    if options.runs_rule_checkers() {
        report.results = validate_units(options, &skills_dir)?;
        if options.runs_counts() {
            report.count_issues = counts::check_counts(&options.root, &skills_dir);
        }
    }

    if options.runs_workflows() {
        let ctx = WorkflowContext::new(&options.root, &options.paths, options.parser);
        report.workflow_issues = WorkflowValidator::new().validate(&ctx);
    }

    tracing::info!(
        skills = report.results.len(),
        errors = report.total_errors(),
        warnings = report.total_warnings(),
        "validation finished"
    );
    Ok(report)
}

fn validate_units(options: &ValidationOptions, skills_dir: &Path) -> Result<Vec<UnitResult>> {
    let mut dirs = discover_units(skills_dir)?;
    if let Some(wanted) = &options.skill {
        dirs.retain(|dir| dir.file_name().is_some_and(|name| name == wanted.as_str()));
        if dirs.is_empty() {
            return Err(SkillcheckError::UnitNotFound(wanted.clone()));
        }
    }

    let checkers = checks::registry_for(&options.limits, options.check.and_then(CheckFilter::category));
    tracing::debug!(
        units = dirs.len(),
        checkers = checkers.len(),
        parser = options.parser.name(),
        "running rule checkers"
    );

    let results = dirs
        .into_iter()
        .map(|dir| {
            let id = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let unit = Unit::new(dir, id.clone(), options.parser);
            let issues = checks::run_checkers(&checkers, &unit);
            tracing::debug!(unit = %id, issues = issues.len(), "unit checked");
            UnitResult { unit: id, issues }
        })
        .collect();
    Ok(results)
}
