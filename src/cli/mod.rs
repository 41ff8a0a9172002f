//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::{MarkdownFormat, ReportFormat};

pub mod commands;
pub mod output;

/// Skillcheck - validate skill definitions, workflow command records and their manifest
#[derive(Parser, Debug)]
#[command(name = "skillcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: <root>/skillcheck.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the selected command writes JSON to stdout; logs follow suit.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        match &self.command {
            Commands::Validate(args) => args.format == ReportFormat::Json,
            Commands::Markdown(args) => args.format == MarkdownFormat::Json,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate skills, workflow records and the manifest
    Validate(commands::validate::ValidateArgs),

    /// Scan markdown files for broken fences and tables
    Markdown(commands::markdown::MarkdownArgs),
}
