use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI argument parsing with environment variable support.
///
/// Environment variables follow the pattern `DOCSMITH_*` and are overridden by
/// CLI flags. Example: `DOCSMITH_PROVIDER=openai` is overridden by
/// `--provider anthropic`.
#[derive(Parser, Debug)]
#[command(name = "docsmith")]
#[command(about = "Auto-generate documentation comments for source files with an LLM")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(short, long, default_value = "docsmith.toml", env = "DOCSMITH_CONFIG")]
    pub config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Document eligible source files under a path (directory or single file)
    Generate {
        /// File or directory to document
        #[arg(default_value = ".")]
        path: PathBuf,

        /// LLM provider
        #[arg(short, long, env = "DOCSMITH_PROVIDER")]
        provider: Option<String>,

        /// Model to use
        #[arg(short, long, env = "DOCSMITH_MODEL")]
        model: Option<String>,

        /// Include only matching files (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Exclude matching files (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Skip files whose archive already exists
        #[arg(long, env = "DOCSMITH_SKIP_DOCUMENTED")]
        skip_documented: bool,

        /// List the files that would be documented without calling the LLM
        #[arg(long, env = "DOCSMITH_DRY_RUN")]
        dry_run: bool,
    },

    /// Delete archive files under a directory
    Clean {
        /// Directory to clean
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
