//! skillcheck markdown - Scan markdown for broken fences and tables

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use crate::cli::output::MarkdownFormat;
use crate::error::Result;
use crate::markdown::{render_json, render_text, scan_path};

use super::exit_code;

#[derive(Args, Debug)]
pub struct MarkdownArgs {
    /// File or directory to scan
    #[arg(default_value = "skills")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = MarkdownFormat::Text)]
    pub format: MarkdownFormat,
}

pub fn run(args: &MarkdownArgs) -> Result<ExitCode> {
    let issues = scan_path(&args.path)?;
    tracing::info!(path = %args.path.display(), issues = issues.len(), "markdown scan finished");

    let rendered = match args.format {
        MarkdownFormat::Json => render_json(&issues)?,
        MarkdownFormat::Text => render_text(&issues),
    };
    println!("{rendered}");

    Ok(exit_code(!issues.is_empty()))
}
