//! Process adapter interface
//!
//! The three low-level execution primitives every subprocess-based runner is
//! built from. Runners only talk to this trait so tests can substitute a
//! recording implementation.

use crate::{error::Result, types::ExecutionResult};
use std::fmt;
use std::path::Path;

/// Placeholder replaced with the full path of the snippet file
pub const FILE_PLACEHOLDER: &str = "{file}";
/// Placeholder replaced with the snippet file name without its suffix
pub const STEM_PLACEHOLDER: &str = "{stem}";
/// Placeholder replaced with the directory holding the snippet file
pub const DIR_PLACEHOLDER: &str = "{dir}";

/// Captured streams of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

impl From<ProcessOutput> for ExecutionResult {
    fn from(output: ProcessOutput) -> Self {
        ExecutionResult::new(output.stdout, output.stderr)
    }
}

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// A program invoked without arguments
    pub fn bare(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Substitute the snippet placeholders in the program and every argument
    pub fn expand(&self, file: &Path) -> CommandLine {
        let file_str = file.to_string_lossy();
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = file
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let substitute = |value: &str| {
            value
                .replace(FILE_PLACEHOLDER, &file_str)
                .replace(STEM_PLACEHOLDER, &stem)
                .replace(DIR_PLACEHOLDER, &dir)
        };

        CommandLine {
            program: substitute(&self.program),
            args: self.args.iter().map(|arg| substitute(arg)).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Source written to a throwaway file and executed from that file's directory
#[derive(Debug, Clone)]
pub struct TempFileJob<'a> {
    pub source: &'a str,
    /// File suffix including the dot, e.g. `.c`
    pub suffix: &'a str,
    /// Steps that must exit successfully before `command` runs (compilers)
    pub prepare: Vec<CommandLine>,
    /// The step whose output is captured
    pub command: CommandLine,
}

impl<'a> TempFileJob<'a> {
    pub fn new(source: &'a str, suffix: &'a str, command: CommandLine) -> Self {
        Self {
            source,
            suffix,
            prepare: Vec::new(),
            command,
        }
    }

    pub fn with_prepare(mut self, step: CommandLine) -> Self {
        self.prepare.push(step);
        self
    }
}

/// Trait for spawning external processes
pub trait ProcessAdapter: Send + Sync {
    /// Feed `input` to the standard input of `command` and collect its output
    fn run_via_pipe(&self, command: &str, args: &[String], input: &str) -> Result<ProcessOutput>;

    /// Write the job's source to a temp file and run its command lines
    /// from the file's directory
    fn run_via_tempfile(&self, job: &TempFileJob<'_>) -> Result<ProcessOutput>;

    /// Run `command` from inside `directory`
    fn run_via_directory_command(
        &self,
        command: &str,
        args: &[String],
        directory: &Path,
    ) -> Result<ProcessOutput>;
}
