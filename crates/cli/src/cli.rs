use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{clean_command, languages_command, run_command};

#[derive(Parser, Debug)]
#[command(name = "docexec")]
#[command(version, about, long_about = None, propagate_version = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Config file to use instead of searching for .docexec.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute one block of source text and print its output
    #[command(visible_alias = "r")]
    Run(RunArgs),
    /// List the supported languages and their executables
    #[command(visible_alias = "l")]
    Languages,
    /// Remove the output cache directory
    Clean,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Read the block from this file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Document the block belongs to (enables caching of inline blocks)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Language tag (defaults to the configured default language)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Executable to run the block with
    #[arg(short = 'w', long = "with")]
    pub executable: Option<String>,

    /// Extra arguments for the executable, whitespace separated
    #[arg(long, allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Project directory for build-tool executables
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    /// Keep bindings for the following blocks
    #[arg(long)]
    pub context: bool,

    /// Neither read nor write the output cache
    #[arg(long)]
    pub no_cache: bool,

    /// Print the whole block output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Run(args) => run_command(&args, config),
            Commands::Languages => languages_command(),
            Commands::Clean => clean_command(config),
        }
    }
}
