//! skillcheck validate - Run rule, workflow and count checks

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use crate::cli::Cli;
use crate::cli::output::{ReportFormat, render_json, render_table};
use crate::config::Config;
use crate::error::Result;
use crate::frontmatter::{HeaderParser, ParserChoice};
use crate::validator::{self, CheckFilter, ValidationOptions};

use super::exit_code;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Run only checks in this category
    #[arg(long, value_enum)]
    pub check: Option<CheckFilter>,

    /// Validate only this skill directory
    #[arg(long)]
    pub skill: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// Skills directory (default from config: skills)
    #[arg(long)]
    pub skills_dir: Option<PathBuf>,

    /// Project root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Header and record parser
    #[arg(long, value_enum)]
    pub parser: Option<ParserChoice>,
}

pub fn run(cli: &Cli, args: &ValidateArgs) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref(), &args.root)?;
    let options = options_from(&config, args)?;

    let report = validator::run(&options)?;

    let rendered = match args.format {
        ReportFormat::Json => render_json(&report)?,
        ReportFormat::Table => render_table(&report, std::io::stdout().is_terminal()),
    };
    println!("{rendered}");

    Ok(exit_code(report.has_errors()))
}

/// CLI flags layered over config.
fn options_from(config: &Config, args: &ValidateArgs) -> Result<ValidationOptions> {
    let mut options = ValidationOptions::from_config(&args.root, config)?;
    if let Some(dir) = &args.skills_dir {
        options.paths.skills_dir.clone_from(dir);
    }
    if let Some(choice) = args.parser {
        options.parser = HeaderParser::resolve(choice)?;
    }
    options.check = args.check;
    options.skill.clone_from(&args.skill);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ValidateArgs {
        ValidateArgs {
            check: Some(CheckFilter::Yaml),
            skill: Some("alpha".into()),
            format: ReportFormat::Table,
            skills_dir: Some(PathBuf::from("other")),
            root: PathBuf::from("/project"),
            parser: Some(ParserChoice::Fallback),
        }
    }

    #[test]
    fn flags_override_config() {
        let options = options_from(&Config::default(), &args()).unwrap();
        assert_eq!(options.skills_dir(), PathBuf::from("/project/other"));
        assert_eq!(options.parser, HeaderParser::Fallback);
        assert_eq!(options.check, Some(CheckFilter::Yaml));
        assert_eq!(options.skill.as_deref(), Some("alpha"));
    }

    #[test]
    fn config_applies_without_flags() {
        let mut config = Config::default();
        config.paths.skills_dir = PathBuf::from("units");
        let mut bare = args();
        bare.skills_dir = None;

        let options = options_from(&config, &bare).unwrap();
        assert_eq!(options.skills_dir(), PathBuf::from("/project/units"));
    }
}
