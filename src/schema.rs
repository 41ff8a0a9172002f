//! Fixed vocabularies and layout constants for skills and workflow records.
//!
//! Every closed value set the checkers compare against lives here.

use std::fmt;

/// Skill definition file inside every skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// Reference document directory inside a skill directory.
pub const REFERENCES_DIR: &str = "references";

/// Markdown files under the commands tree with this name are never orphans.
pub const COMMAND_INDEX_FILE: &str = "COMMAND.md";

/// Default units directory, relative to the project root.
pub const SKILLS_DIR: &str = "skills";

/// Default commands directory, relative to the project root.
pub const COMMANDS_DIR: &str = "commands";

/// Default manifest location, relative to the project root.
pub const MANIFEST_FILE: &str = "commands/workflow-manifest.yaml";

/// Documentation files scanned for advertised counts, relative to the project root.
pub const COUNT_FILES: &[&str] = &[
    ".claude-plugin/plugin.json",
    ".claude-plugin/marketplace.json",
    "README.md",
];

/// Header delimiter line.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Header fields every skill must declare.
pub const REQUIRED_FIELDS: &[&str] = &["name", "description"];

/// Fields every skill `metadata` block must declare.
pub const REQUIRED_METADATA_FIELDS: &[&str] = &[
    "triggers",
    "role",
    "scope",
    "output-format",
    "domain",
    "related-skills",
];

/// Fields every workflow record must declare.
pub const DEFINITION_REQUIRED_FIELDS: &[&str] =
    &["command", "path", "description", "inputs", "outputs", "requires"];

/// Extra field required for records whose command has a `phase:` prefix.
pub const DEFINITION_PHASE_FIELD: &str = "phase";

/// Fields every structured input entry must declare.
pub const INPUT_REQUIRED_FIELDS: &[&str] = &["name", "type", "required", "description"];

/// Fields every structured output entry must declare.
pub const OUTPUT_REQUIRED_FIELDS: &[&str] = &["name", "type"];

/// Canonical body section order. Sections not in this list are ignored.
pub const SECTION_ORDER: &[&str] = &[
    "Role Definition",
    "When to Use This Skill",
    "Core Workflow",
    "Reference Guide",
    "Constraints",
    "Output Templates",
    "Knowledge Reference",
    "Related Skills",
];

/// Prefix a description must start with.
pub const DESCRIPTION_PREFIX: &str = "Use when";

/// Number of numbered steps expected under the core workflow section.
pub const CORE_WORKFLOW_STEPS: usize = 5;

/// Marker phrases that must not appear near the top of a reference document.
pub const NON_STANDARD_MARKERS: &[&str] = &["Reference for:", "Load when:"];

/// Default lower bound on non-blank body lines.
pub const DEFAULT_MIN_BODY_LINES: usize = 80;

/// Default upper bound on non-blank body lines.
pub const DEFAULT_MAX_BODY_LINES: usize = 100;

/// Default maximum description length in characters.
pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 1024;

/// Default number of leading lines scanned for marker phrases.
pub const DEFAULT_MARKER_SCAN_LINES: usize = 10;

/// A closed set of accepted string values.
pub trait Vocabulary: Copy + fmt::Display + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Canonical spelling of the member.
    fn as_str(self) -> &'static str;

    /// Exact, case-sensitive lookup.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == value)
    }

    /// Sorted, comma-joined list of accepted values, as shown in messages.
    fn expected() -> String {
        let mut values: Vec<&str> = Self::ALL.iter().map(|member| member.as_str()).collect();
        values.sort_unstable();
        values.join(", ")
    }
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Vocabulary for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Skill knowledge domain. Unknown domains are advisory only.
    Domain {
        Generation => "generation",
        Structure => "structure",
        Craft => "craft",
        Quality => "quality",
        Strategy => "strategy",
        Seo => "seo",
        Research => "research",
    }
}

vocabulary! {
    /// Skill `metadata.scope`.
    Scope {
        Implementation => "implementation",
        Design => "design",
        Analysis => "analysis",
    }
}

vocabulary! {
    /// Skill `metadata.output-format`.
    SkillOutputFormat {
        Document => "document",
        Report => "report",
        Analysis => "analysis",
    }
}

vocabulary! {
    /// Workflow phase a command belongs to.
    Phase {
        Capture => "capture",
        Writing => "writing",
    }
}

vocabulary! {
    /// Lifecycle status of a workflow command.
    CommandStatus {
        Existing => "existing",
        Planned => "planned",
        Deprecated => "deprecated",
    }
}

vocabulary! {
    /// External capability a command may require.
    Capability {
        Ticketing => "ticketing",
        Documentation => "documentation",
    }
}

vocabulary! {
    /// Strength of a phase-to-phase dependency.
    DependencyStrength {
        Required => "required",
        Recommended => "recommended",
    }
}

vocabulary! {
    /// Type tag of a structured workflow input.
    InputType {
        String => "string",
        Url => "url",
        UrlList => "list[url]",
        StringList => "list[string]",
        Flag => "flag",
        FileList => "file[]",
    }
}

vocabulary! {
    /// Type tag of a structured workflow output.
    OutputType {
        Url => "url",
        Document => "document",
        Tickets => "tickets",
        Report => "report",
        File => "file",
        Directory => "directory",
    }
}
