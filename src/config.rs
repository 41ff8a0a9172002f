use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillcheckError};
use crate::frontmatter::ParserChoice;
use crate::schema::{
    COMMANDS_DIR, DEFAULT_MARKER_SCAN_LINES, DEFAULT_MAX_BODY_LINES,
    DEFAULT_MAX_DESCRIPTION_CHARS, DEFAULT_MIN_BODY_LINES, MANIFEST_FILE, SKILLS_DIR,
};

/// Project-level config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "skillcheck.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load config: explicit path, else `SKILLCHECK_CONFIG`, else
    /// `<root>/skillcheck.toml` when present; then environment overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("SKILLCHECK_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SkillcheckError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(project) = Self::load_patch(&root.join(CONFIG_FILE))? {
            config.merge_patch(project);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            SkillcheckError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            SkillcheckError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.parser {
            self.parser.merge(patch);
        }
        if let Some(patch) = patch.limits {
            self.limits.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SKILLCHECK_SKILLS_DIR") {
            self.paths.skills_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SKILLCHECK_COMMANDS_DIR") {
            self.paths.commands_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SKILLCHECK_PARSER") {
            self.parser.mode = ParserChoice::from_name(&value)?;
        }
        if let Some(value) = parse_usize("SKILLCHECK_MIN_LINES", lookup("SKILLCHECK_MIN_LINES"))? {
            self.limits.min_body_lines = value;
        }
        if let Some(value) = parse_usize("SKILLCHECK_MAX_LINES", lookup("SKILLCHECK_MAX_LINES"))? {
            self.limits.max_body_lines = value;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.limits.min_body_lines > self.limits.max_body_lines {
            return Err(SkillcheckError::Config(format!(
                "limits.min_body_lines ({}) exceeds limits.max_body_lines ({})",
                self.limits.min_body_lines, self.limits.max_body_lines
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub parser: Option<ParserPatch>,
    pub limits: Option<LimitsPatch>,
}

/// Project layout, relative to the project root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_skills_dir")]
    pub skills_dir: PathBuf,
    #[serde(default = "default_commands_dir")]
    pub commands_dir: PathBuf,
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            skills_dir: default_skills_dir(),
            commands_dir: default_commands_dir(),
            manifest: default_manifest(),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.skills_dir {
            self.skills_dir = value;
        }
        if let Some(value) = patch.commands_dir {
            self.commands_dir = value;
        }
        if let Some(value) = patch.manifest {
            self.manifest = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub skills_dir: Option<PathBuf>,
    pub commands_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

fn default_skills_dir() -> PathBuf {
    PathBuf::from(SKILLS_DIR)
}

fn default_commands_dir() -> PathBuf {
    PathBuf::from(COMMANDS_DIR)
}

fn default_manifest() -> PathBuf {
    PathBuf::from(MANIFEST_FILE)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub mode: ParserChoice,
}

impl ParserConfig {
    fn merge(&mut self, patch: ParserPatch) {
        if let Some(value) = patch.mode {
            self.mode = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ParserPatch {
    pub mode: Option<ParserChoice>,
}

/// Numeric thresholds used by the rule checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_min_body_lines")]
    pub min_body_lines: usize,
    #[serde(default = "default_max_body_lines")]
    pub max_body_lines: usize,
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,
    #[serde(default = "default_marker_scan_lines")]
    pub marker_scan_lines: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_body_lines: DEFAULT_MIN_BODY_LINES,
            max_body_lines: DEFAULT_MAX_BODY_LINES,
            max_description_chars: DEFAULT_MAX_DESCRIPTION_CHARS,
            marker_scan_lines: DEFAULT_MARKER_SCAN_LINES,
        }
    }
}

impl LimitsConfig {
    fn merge(&mut self, patch: LimitsPatch) {
        if let Some(value) = patch.min_body_lines {
            self.min_body_lines = value;
        }
        if let Some(value) = patch.max_body_lines {
            self.max_body_lines = value;
        }
        if let Some(value) = patch.max_description_chars {
            self.max_description_chars = value;
        }
        if let Some(value) = patch.marker_scan_lines {
            self.marker_scan_lines = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LimitsPatch {
    pub min_body_lines: Option<usize>,
    pub max_body_lines: Option<usize>,
    pub max_description_chars: Option<usize>,
    pub marker_scan_lines: Option<usize>,
}

const fn default_min_body_lines() -> usize {
    DEFAULT_MIN_BODY_LINES
}

const fn default_max_body_lines() -> usize {
    DEFAULT_MAX_BODY_LINES
}

const fn default_max_description_chars() -> usize {
    DEFAULT_MAX_DESCRIPTION_CHARS
}

const fn default_marker_scan_lines() -> usize {
    DEFAULT_MARKER_SCAN_LINES
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_usize(key: &str, value: Option<String>) -> Result<Option<usize>> {
    match value {
        Some(value) => value.trim().parse::<usize>().map(Some).map_err(|err| {
            SkillcheckError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}
