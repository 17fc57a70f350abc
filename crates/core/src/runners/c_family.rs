//! C and C++: compile a temp file, then run the binary

use crate::{
    error::Result,
    interfaces::{CommandLine, TempFileJob, process::FILE_PLACEHOLDER},
    types::{ExecutionRequest, ExecutionResult},
};
use tracing::info;

use super::traits::{LanguageRunner, RunEnv};

/// Binary produced by the compilers when no `-o` is given
const COMPILED_BINARY: &str = "./a.out";

/// Runner shared by the C-like languages; only the compilers and the file
/// suffix differ.
#[derive(Debug, Clone, Copy)]
pub struct CFamilyRunner {
    language: &'static str,
    default: &'static str,
    executables: &'static [&'static str],
    suffix: &'static str,
}

impl CFamilyRunner {
    pub const fn c() -> Self {
        Self {
            language: "c",
            default: "gcc",
            executables: &["gcc", "clang", "make"],
            suffix: ".c",
        }
    }

    pub const fn cpp() -> Self {
        Self {
            language: "cpp",
            default: "g++",
            executables: &["g++", "clang++", "make"],
            suffix: ".cpp",
        }
    }

    fn compile_step(executable: &str, arguments: &[String]) -> CommandLine {
        let mut args = arguments.to_vec();
        args.push(FILE_PLACEHOLDER.to_string());
        CommandLine::new(executable, args)
    }
}

impl LanguageRunner for CFamilyRunner {
    fn language(&self) -> &'static str {
        self.language
    }

    fn default_executable(&self) -> &'static str {
        self.default
    }

    fn executables(&self) -> &'static [&'static str] {
        self.executables
    }

    fn requires_project_dir(&self, executable: &str) -> bool {
        executable == "make"
    }

    fn run(
        &self,
        executable: &str,
        request: &ExecutionRequest,
        env: RunEnv<'_>,
    ) -> Result<ExecutionResult> {
        if executable == "make" {
            let dir = self.project_dir(executable, request)?;
            info!("Running make in {}", dir.display());
            return env
                .process
                .run_via_directory_command("make", &request.arguments, dir)
                .map(Into::into);
        }
        if !self.executables.contains(&executable) {
            return Err(self.unsupported(executable));
        }

        let run_step = CommandLine::bare(COMPILED_BINARY);
        let job = TempFileJob::new(&request.source_text, self.suffix, run_step)
            .with_prepare(Self::compile_step(executable, &request.arguments));
        info!("Compiling {} snippet with {}", self.language, executable);
        env.process.run_via_tempfile(&job).map(Into::into)
    }
}
